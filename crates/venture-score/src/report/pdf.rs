use super::assembler::ReportDocument;
use super::layout::{
    Badge, Block, FontStyle, PageGeometry, RgbColor, TextRun, BADGE_GAP, BADGE_HEIGHT,
    BANNER_HEIGHT, BULLET_MARKER_INDENT, SECTION_HEADER_HEIGHT,
};
use super::ReportError;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
    Rgb,
};

const POINT_TO_MM: f32 = 0.352_778;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn for_style(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

fn color(rgb: RgbColor) -> Color {
    let RgbColor(r, g, b) = rgb;
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn pdf_err(err: printpdf::Error) -> ReportError {
    ReportError::Pdf(err.to_string())
}

/// Baseline offset for the first line of text set at `size` points.
fn ascent(size: f32) -> f32 {
    size * POINT_TO_MM * 0.8
}

/// Draws onto one page; all coordinates are millimetres from the top edge.
struct Canvas<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    geometry: &'a PageGeometry,
}

impl Canvas<'_> {
    fn flip(&self, top: f32) -> Mm {
        Mm(self.geometry.height - top)
    }

    fn fill_rect(&self, x: f32, top: f32, width: f32, height: f32, fill: RgbColor) {
        self.layer.set_fill_color(color(fill));
        let corners = [
            (x, top),
            (x + width, top),
            (x + width, top + height),
            (x, top + height),
        ];
        self.layer.add_polygon(Polygon {
            rings: vec![corners
                .iter()
                .map(|&(px, py)| (Point::new(Mm(px), self.flip(py)), false))
                .collect()],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn rule(&self, top: f32, stroke: RgbColor) {
        let left = self.geometry.margin;
        let right = self.geometry.width - self.geometry.margin;
        self.layer.set_outline_color(color(stroke));
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(left), self.flip(top)), false),
                (Point::new(Mm(right), self.flip(top)), false),
            ],
            is_closed: false,
        });
    }

    fn text(&self, text: &str, size: f32, style: FontStyle, x: f32, baseline: f32, ink: RgbColor) {
        if text.is_empty() {
            return;
        }
        self.layer.set_fill_color(color(ink));
        self.layer.use_text(
            text,
            size,
            Mm(x),
            self.flip(baseline),
            self.fonts.for_style(style),
        );
    }

    fn run(&self, run: &TextRun, top: f32) {
        let x = self.geometry.margin + run.indent;
        for (index, line) in run.lines.iter().enumerate() {
            let baseline = top + ascent(run.size) + index as f32 * self.geometry.line_height;
            self.text(line, run.size, run.style, x, baseline, RgbColor::BLACK);
        }
    }

    fn badges(&self, badges: &[Badge], top: f32) {
        let mut x = self.geometry.margin;
        for badge in badges {
            self.fill_rect(x, top, badge.width, BADGE_HEIGHT, badge.fill);
            self.text(
                &badge.label,
                12.0,
                FontStyle::Bold,
                x + 5.0,
                top + BADGE_HEIGHT / 2.0 + ascent(12.0) / 2.0,
                RgbColor::WHITE,
            );
            x += badge.width + BADGE_GAP;
        }
    }

    fn block(&self, block: &Block, top: f32) {
        match block {
            Block::Banner {
                title,
                lines,
                badges,
            } => {
                self.fill_rect(0.0, 0.0, self.geometry.width, BANNER_HEIGHT, RgbColor::BANNER_INDIGO);
                let x = self.geometry.margin;
                self.text(title, 20.0, FontStyle::Bold, x, 14.0, RgbColor::WHITE);
                let mut baseline = 23.0;
                for (index, line) in lines.iter().enumerate() {
                    let (size, style) = if index == 0 {
                        (16.0, FontStyle::Bold)
                    } else {
                        (11.0, FontStyle::Regular)
                    };
                    self.text(line, size, style, x, baseline, RgbColor::WHITE);
                    baseline += 6.0;
                }
                self.badges(badges, BANNER_HEIGHT - BADGE_HEIGHT - 4.0);
            }
            Block::SectionHeader { title } => {
                let width = self.geometry.content_width();
                self.fill_rect(
                    self.geometry.margin,
                    top,
                    width,
                    SECTION_HEADER_HEIGHT,
                    RgbColor::SECTION_BLUE,
                );
                self.text(
                    title,
                    14.0,
                    FontStyle::Bold,
                    self.geometry.margin + 5.0,
                    top + 8.0,
                    RgbColor::WHITE,
                );
            }
            Block::Heading(run) | Block::Paragraph(run) => self.run(run, top),
            Block::Bullet(run) => {
                self.text(
                    "-",
                    run.size,
                    FontStyle::Bold,
                    self.geometry.margin + BULLET_MARKER_INDENT,
                    top + ascent(run.size),
                    RgbColor::BLACK,
                );
                self.run(run, top);
            }
            Block::Rule { color } => self.rule(top + 1.0, *color),
            Block::Spacer { .. } => {}
            Block::Group { blocks } => {
                let mut y = top;
                for child in blocks {
                    self.block(child, y);
                    y += child.height(self.geometry);
                }
            }
        }
    }
}

/// Renders a paginated report with the built-in Helvetica faces.
pub fn render_pdf(document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let geometry = &document.geometry;
    let (width, height) = (Mm(geometry.width), Mm(geometry.height));
    let (doc, first_page, first_layer) = PdfDocument::new(&document.title, width, height, "Layer 1");

    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(pdf_err)?,
    };

    for (index, page) in document.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, format!("Layer {}", index + 1))
        };
        let canvas = Canvas {
            layer: doc.get_page(page_index).get_layer(layer_index),
            fonts: &fonts,
            geometry,
        };
        for placed in &page.blocks {
            canvas.block(&placed.block, placed.top);
        }
    }

    doc.save_to_bytes().map_err(pdf_err)
}
