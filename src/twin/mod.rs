//! The Digital Work Twin: collect a simulated request, forward it to
//! the hosted model and turn the reply into something displayable.

pub mod citations;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod models;
pub mod render;
pub mod service;
pub mod slots;
pub mod state;

pub use citations::{CitationSource, StaticCitations};
pub use dispatch::{dispatch, parse_response};
pub use error::{GENERIC_FAILURE, TwinError};
pub use form::FormInput;
pub use models::{Agenda, CandidateSlot, Citation, Intent, IntentHint, TwinRequest, TwinResponse};
pub use render::{ResponseView, split_brief};
pub use service::Twin;
pub use slots::{MockSlotSource, SlotSource, format_slot};
pub use state::{Transition, TwinState};
