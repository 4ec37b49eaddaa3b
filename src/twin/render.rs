//! Display model for the response card. Pure functions of the current
//! output; the HTML page and the terminal both render from
//! `ResponseView`.

use std::fmt::{self, Write};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::models::TwinResponse;

pub const BRIEF_LABELS: [&str; 3] = ["Goal:", "Context:", "Next Steps:"];

static BRIEF_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&BRIEF_LABELS.map(regex::escape).join("|")).expect("Invalid brief label regex")
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BriefSegment {
    pub heading: bool,
    pub text: String,
}

/// Split a mini-brief on its section labels. Labels become heading
/// segments, everything between them stays as-is. Missing labels are
/// simply not distinguished.
pub fn split_brief(brief: &str) -> Vec<BriefSegment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in BRIEF_LABEL_RE.find_iter(brief) {
        if m.start() > last {
            segments.push(BriefSegment {
                heading: false,
                text: brief[last..m.start()].to_string(),
            });
        }
        segments.push(BriefSegment {
            heading: true,
            text: m.as_str().to_string(),
        });
        last = m.end();
    }
    if last < brief.len() {
        segments.push(BriefSegment {
            heading: false,
            text: brief[last..].to_string(),
        });
    }
    segments
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgendaItemView {
    pub number: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeetingView {
    pub title: String,
    pub duration_min: Option<u32>,
    pub items: Vec<AgendaItemView>,
    pub slots: Vec<String>,
    pub timezone: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardView {
    pub intent: String,
    pub is_meeting: bool,
    pub confidence_pct: u32,
    pub questions: Option<Vec<String>>,
    pub brief: Vec<BriefSegment>,
    pub meeting: Option<MeetingView>,
    pub notes: String,
    pub citations: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseView {
    Placeholder,
    Card(CardView),
}

pub const PLACEHOLDER_TITLE: &str = "No Data Generated";
pub const PLACEHOLDER_HINT: &str = "Submit a request to see the Digital Work Twin in action.";
pub const NO_SLOTS: &str = "No slots available or required.";
pub const NO_AGENDA_ITEMS: &str = "No agenda items provided.";
const DEFAULT_AGENDA_TITLE: &str = "Meeting Agenda";
const DEFAULT_NOTES: &str = "All checks passed.";

fn non_empty(items: &[String]) -> Option<Vec<String>> {
    let items: Vec<String> = items
        .iter()
        .filter(|i| !i.trim().is_empty())
        .cloned()
        .collect();
    if items.is_empty() { None } else { Some(items) }
}

impl ResponseView {
    pub fn from_output(output: Option<&TwinResponse>, timezone: &str) -> Self {
        let Some(resp) = output else {
            return ResponseView::Placeholder;
        };

        let meeting = resp.is_meeting().then(|| {
            let agenda = resp.agenda.clone().unwrap_or_default();
            let title = if agenda.title.trim().is_empty() {
                DEFAULT_AGENDA_TITLE.to_string()
            } else {
                agenda.title
            };
            MeetingView {
                title,
                duration_min: (agenda.duration_min > 0).then_some(agenda.duration_min),
                items: agenda
                    .items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, text)| AgendaItemView {
                        number: idx + 1,
                        text,
                    })
                    .collect(),
                slots: resp.rendered_slots.clone(),
                timezone: timezone.to_string(),
            }
        });

        let notes = if resp.notes_for_orchestrator.trim().is_empty() {
            DEFAULT_NOTES.to_string()
        } else {
            resp.notes_for_orchestrator.clone()
        };

        ResponseView::Card(CardView {
            intent: resp.intent.to_string(),
            is_meeting: resp.is_meeting(),
            confidence_pct: (resp.confidence * 100.0).round() as u32,
            questions: non_empty(&resp.questions),
            brief: split_brief(&resp.mini_brief),
            meeting,
            notes,
            citations: non_empty(&resp.citations_used),
        })
    }

    pub fn card(&self) -> Option<&CardView> {
        match self {
            ResponseView::Card(card) => Some(card),
            ResponseView::Placeholder => None,
        }
    }
}

/// Plain text rendering for terminals. Headings are wrapped in `**`.
impl fmt::Display for ResponseView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let card = match self {
            ResponseView::Placeholder => {
                writeln!(f, "{}", PLACEHOLDER_TITLE)?;
                return writeln!(f, "{}", PLACEHOLDER_HINT);
            }
            ResponseView::Card(card) => card,
        };

        writeln!(f, "[{}] Confidence: {}%", card.intent, card.confidence_pct)?;

        if let Some(questions) = &card.questions {
            writeln!(f, "\nClarifying Questions Needed")?;
            for q in questions {
                writeln!(f, "  - {}", q)?;
            }
        }

        writeln!(f, "\nMini-Brief")?;
        let mut brief = String::new();
        for segment in &card.brief {
            if segment.heading {
                write!(brief, "\n**{}** ", segment.text)?;
            } else {
                write!(brief, "{}", segment.text.trim())?;
            }
        }
        writeln!(f, "{}", brief.trim_start())?;

        if let Some(meeting) = &card.meeting {
            match meeting.duration_min {
                Some(d) => writeln!(f, "\nMeeting Proposal ({} min)", d)?,
                None => writeln!(f, "\nMeeting Proposal")?,
            }
            writeln!(f, "{}", meeting.title)?;
            writeln!(f, "\nAgenda")?;
            if meeting.items.is_empty() {
                writeln!(f, "  {}", NO_AGENDA_ITEMS)?;
            }
            for item in &meeting.items {
                writeln!(f, "  {}. {}", item.number, item.text)?;
            }
            writeln!(f, "\nProposed Slots ({})", meeting.timezone)?;
            if meeting.slots.is_empty() {
                writeln!(f, "  {}", NO_SLOTS)?;
            }
            for slot in &meeting.slots {
                writeln!(f, "  * {}", slot)?;
            }
        }

        writeln!(f, "\nDWT Orchestrator Notes")?;
        writeln!(f, "{}", card.notes)?;

        if let Some(citations) = &card.citations {
            writeln!(f, "\nCitations Used: {}", citations.join(", "))?;
        }

        Ok(())
    }
}
