mod aggregate;
mod common;
mod scoring;
mod session;
