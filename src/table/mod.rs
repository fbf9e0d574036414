mod html;
mod rewrite;
mod scan;
#[cfg(test)]
mod tests;

pub use html::HtmlRenderer;
pub use rewrite::{RewriteStats, TableRewriter};
