use super::ReportError;
use serde::Serialize;

pub const BANNER_HEIGHT: f32 = 60.0;
pub const SECTION_HEADER_HEIGHT: f32 = 12.0;
pub const SECTION_HEADER_GAP: f32 = 3.0;
pub const BADGE_HEIGHT: f32 = 12.0;
pub const BADGE_GAP: f32 = 5.0;
pub const RULE_HEIGHT: f32 = 5.0;
pub const BULLET_MARKER_INDENT: f32 = 5.0;
pub const BULLET_TEXT_INDENT: f32 = 15.0;

/// Page size and spacing in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub line_height: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin: 20.0,
        line_height: 6.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Wrap width for bullet text, which starts at the bullet indent.
    pub fn bullet_width(&self) -> f32 {
        self.content_width() - BULLET_TEXT_INDENT
    }

    /// Lowest point a block may reach before a page break.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin
    }

    fn usable_height(&self) -> f32 {
        self.bottom_limit() - self.margin
    }

    fn validate(&self) -> Result<(), ReportError> {
        if self.line_height <= 0.0 || self.usable_height() < self.line_height {
            return Err(ReportError::Layout(format!(
                "page {}x{}mm with {}mm margins leaves no room for text",
                self.width, self.height, self.margin
            )));
        }
        if self.content_width() <= BULLET_TEXT_INDENT {
            return Err(ReportError::Layout(format!(
                "page width {}mm is too narrow for {}mm margins",
                self.width, self.margin
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor(255, 255, 255);
    pub const SECTION_BLUE: RgbColor = RgbColor(59, 130, 246);
    pub const BANNER_INDIGO: RgbColor = RgbColor(102, 126, 234);
    pub const AI_PURPLE: RgbColor = RgbColor(139, 92, 246);
    pub const SCORE_GREEN: RgbColor = RgbColor(34, 197, 94);
    pub const SCORE_YELLOW: RgbColor = RgbColor(234, 179, 8);
    pub const SCORE_RED: RgbColor = RgbColor(239, 68, 68);
}

/// Pre-wrapped lines sharing one font.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub lines: Vec<String>,
    pub size: f32,
    pub style: FontStyle,
    pub indent: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub label: String,
    pub fill: RgbColor,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Full-bleed band at the top of the first page.
    Banner {
        title: String,
        lines: Vec<String>,
        badges: Vec<Badge>,
    },
    SectionHeader {
        title: String,
    },
    Heading(TextRun),
    Paragraph(TextRun),
    Bullet(TextRun),
    Rule {
        color: RgbColor,
    },
    Spacer {
        height: f32,
    },
    /// Children kept on one page when they fit.
    Group {
        blocks: Vec<Block>,
    },
}

impl Block {
    pub fn height(&self, geometry: &PageGeometry) -> f32 {
        match self {
            Block::Banner { .. } => BANNER_HEIGHT,
            Block::SectionHeader { .. } => SECTION_HEADER_HEIGHT + SECTION_HEADER_GAP,
            Block::Heading(run) | Block::Paragraph(run) | Block::Bullet(run) => {
                run.lines.len() as f32 * geometry.line_height
            }
            Block::Rule { .. } => RULE_HEIGHT,
            Block::Spacer { height } => *height,
            Block::Group { blocks } => blocks.iter().map(|block| block.height(geometry)).sum(),
        }
    }

    /// Every visible string in reading order.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Block::Banner {
                title,
                lines,
                badges,
            } => std::iter::once(title.as_str())
                .chain(lines.iter().map(String::as_str))
                .chain(badges.iter().map(|badge| badge.label.as_str()))
                .collect(),
            Block::SectionHeader { title } => vec![title.as_str()],
            Block::Heading(run) | Block::Paragraph(run) | Block::Bullet(run) => {
                run.lines.iter().map(String::as_str).collect()
            }
            Block::Rule { .. } | Block::Spacer { .. } => Vec::new(),
            Block::Group { blocks } => blocks.iter().flat_map(Block::texts).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    /// Distance from the top edge of the page, in millimetres.
    pub top: f32,
    pub block: Block,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub blocks: Vec<PlacedBlock>,
}

struct Paginator<'a> {
    geometry: &'a PageGeometry,
    pages: Vec<PageLayout>,
    y: f32,
}

impl Paginator<'_> {
    fn current(&mut self) -> &mut PageLayout {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn break_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y = self.geometry.margin;
    }

    fn place(&mut self, block: Block) -> Result<(), ReportError> {
        match block {
            Block::Banner { .. } => {
                if self.pages.len() > 1 || !self.current().blocks.is_empty() {
                    return Err(ReportError::Layout(
                        "banner must open the document".to_string(),
                    ));
                }
                self.current().blocks.push(PlacedBlock { top: 0.0, block });
                self.y = BANNER_HEIGHT + self.geometry.margin;
                Ok(())
            }
            Block::Spacer { height } => {
                self.y += height;
                Ok(())
            }
            block => {
                let height = block.height(self.geometry);
                if height > self.geometry.usable_height() {
                    return self.place_oversized(block);
                }
                if self.y + height > self.geometry.bottom_limit() {
                    self.break_page();
                }
                let top = self.y;
                self.current().blocks.push(PlacedBlock { top, block });
                self.y += height;
                Ok(())
            }
        }
    }

    /// Splits blocks taller than a page; anything indivisible is an error.
    fn place_oversized(&mut self, block: Block) -> Result<(), ReportError> {
        let per_page = (self.geometry.usable_height() / self.geometry.line_height).floor() as usize;
        match block {
            Block::Group { blocks } => blocks.into_iter().try_for_each(|child| self.place(child)),
            Block::Heading(run) if per_page > 0 => {
                self.place_chunks(run, per_page, Block::Heading, Block::Heading)
            }
            Block::Paragraph(run) if per_page > 0 => {
                self.place_chunks(run, per_page, Block::Paragraph, Block::Paragraph)
            }
            // Continuations of a bullet carry no marker.
            Block::Bullet(run) if per_page > 0 => {
                self.place_chunks(run, per_page, Block::Bullet, Block::Paragraph)
            }
            other => Err(ReportError::Layout(format!(
                "block of {:.1}mm cannot fit a {:.1}mm page body",
                other.height(self.geometry),
                self.geometry.usable_height()
            ))),
        }
    }

    fn place_chunks(
        &mut self,
        run: TextRun,
        per_page: usize,
        first: fn(TextRun) -> Block,
        rest: fn(TextRun) -> Block,
    ) -> Result<(), ReportError> {
        for (index, chunk) in run.lines.chunks(per_page).enumerate() {
            let part = TextRun {
                lines: chunk.to_vec(),
                ..run.clone()
            };
            let block = if index == 0 { first(part) } else { rest(part) };
            self.place(block)?;
        }
        Ok(())
    }
}

/// Assigns every block a page and a vertical offset in a single pass.
pub fn paginate(blocks: Vec<Block>, geometry: &PageGeometry) -> Result<Vec<PageLayout>, ReportError> {
    geometry.validate()?;
    let mut paginator = Paginator {
        geometry,
        pages: vec![PageLayout::default()],
        y: geometry.margin,
    };
    for block in blocks {
        paginator.place(block)?;
    }
    Ok(paginator.pages)
}
