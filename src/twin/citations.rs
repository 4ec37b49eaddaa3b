//! Reference documents the model may cite. The static source stands
//! in for a real document search.

use super::models::Citation;

pub trait CitationSource: Send + Sync {
    fn citations(&self) -> Vec<Citation>;
}

const STATIC_CITATIONS: [(&str, &str); 5] = [
    ("FMCG Case Note.pdf", "https://example.com/fmcg"),
    ("Enterprise Search POV.pdf", "https://example.com/search"),
    ("Decision Memo Template.docx", "https://example.com/template"),
    ("Q3 Financials (Confidential).xlsx", "https://example.com/q3"),
    ("Project Titan Roadmap.pdf", "https://example.com/titan"),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct StaticCitations;

impl CitationSource for StaticCitations {
    fn citations(&self) -> Vec<Citation> {
        STATIC_CITATIONS
            .iter()
            .map(|(title, url)| Citation {
                title: title.to_string(),
                url: url.to_string(),
            })
            .collect()
    }
}
