use handlebars::Handlebars;
use serde::Serialize;

use crate::twin::render::{CardView, NO_AGENDA_ITEMS, NO_SLOTS, PLACEHOLDER_HINT, PLACEHOLDER_TITLE};
use crate::core::Owner;
use crate::twin::{Citation, FormInput, IntentHint, ResponseView};

const PAGE_TEMPLATE: &str = "page";

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Digital Work Twin</title>
</head>
<body>
<header>
  <h1>Digital Work Twin</h1>
  <div class="owner">
    <span class="owner-name">{{owner_name}}</span>
    <span class="owner-timezone">{{owner_timezone}}</span>
    <span class="owner-email">{{owner_email}}</span>
  </div>
</header>
<main>
  {{#if alert}}
  <div class="alert" role="alert">{{alert}}</div>
  {{/if}}
  <section class="request">
    <h2>Incoming Request</h2>
    <form method="post" action="/submit">
      <label>Requester Name <input type="text" name="requester_name" required value="{{form.requester_name}}"></label>
      <label>Requester Email <input type="email" name="requester_email" required value="{{form.requester_email}}"></label>
      <label>Intent Hint
        <select name="intent_hint">
          <option value="MEETING"{{#if hint_meeting}} selected{{/if}}>MEETING (Requesting time)</option>
          <option value="INFO"{{#if hint_info}} selected{{/if}}>INFO (Requesting resources/answers)</option>
          <option value="UNKNOWN"{{#if hint_unknown}} selected{{/if}}>UNKNOWN (Ambiguous)</option>
        </select>
      </label>
      <label>Topic <input type="text" name="topic" required value="{{form.topic}}"></label>
      <label>Message <textarea name="message" rows="4" required>{{form.message}}</textarea></label>
      {{#if in_flight}}
      <button type="submit" disabled>Processing...</button>
      {{else}}
      <button type="submit">Process Request</button>
      {{/if}}
    </form>
    <h4>Context Available to AI</h4>
    <ul class="context">
      {{#each citations}}
      <li title="{{url}}">{{title}}</li>
      {{/each}}
    </ul>
    <aside class="how-it-works">
      <h4>How it works</h4>
      <p>The twin sends the request to {{model}} to classify intent, pick safe citations and draft a decision-ready response. Meeting requests get three proposed slots over the next two days.</p>
    </aside>
  </section>
  <section class="output">
    <h3>Twin Output</h3>
    {{#if card}}
    <span class="status">Processed Successfully</span>
    <div class="card">
      <span class="intent">{{card.intent}}</span>
      <span class="confidence">Confidence: {{card.confidence_pct}}%</span>
      {{#if card.questions}}
      <div class="questions">
        <h4>Clarifying Questions Needed</h4>
        <ul>
          {{#each card.questions}}
          <li class="question">{{this}}</li>
          {{/each}}
        </ul>
      </div>
      {{/if}}
      <h3>Mini-Brief</h3>
      <div class="brief">{{#each card.brief}}{{#if heading}}<strong class="brief-heading">{{text}}</strong>{{else}}<span>{{text}}</span>{{/if}}{{/each}}</div>
    </div>
    {{#if card.meeting}}
    <div class="meeting">
      <h3>Meeting Proposal</h3>
      {{#if card.meeting.duration_min}}<span class="duration">{{card.meeting.duration_min}} min</span>{{/if}}
      <h4>{{card.meeting.title}}</h4>
      <h5>Agenda</h5>
      {{#if card.meeting.items}}
      <ol class="agenda">
        {{#each card.meeting.items}}
        <li value="{{number}}">{{text}}</li>
        {{/each}}
      </ol>
      {{else}}
      <p class="empty">{{no_agenda_items}}</p>
      {{/if}}
      <h5>Proposed Slots ({{card.meeting.timezone}})</h5>
      <div class="slots">
        {{#if card.meeting.slots}}
        {{#each card.meeting.slots}}
        <button type="button" class="slot">{{this}}</button>
        {{/each}}
        {{else}}
        <p class="empty">{{no_slots}}</p>
        {{/if}}
      </div>
    </div>
    {{/if}}
    <footer class="notes">
      <h4>DWT Orchestrator Notes</h4>
      <p>{{card.notes}}</p>
      {{#if card.citations}}
      <div class="citations">
        <span>Citations Used:</span>
        {{#each card.citations}}
        <span class="citation">{{this}}</span>
        {{/each}}
      </div>
      {{/if}}
    </footer>
    {{else}}
    <div class="placeholder">
      <h3>{{placeholder_title}}</h3>
      <p>{{placeholder_hint}}</p>
    </div>
    {{/if}}
  </section>
</main>
</body>
</html>
"#;

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry
        .register_template_string(PAGE_TEMPLATE, PAGE_HTML)
        .expect("Failed to register template");
    registry
}

#[derive(Serialize)]
pub struct PageData {
    pub owner_name: String,
    pub owner_timezone: String,
    pub owner_email: String,
    pub model: String,
    pub alert: Option<String>,
    pub in_flight: bool,
    pub form: FormInput,
    pub hint_meeting: bool,
    pub hint_info: bool,
    pub hint_unknown: bool,
    pub citations: Vec<Citation>,
    pub card: Option<CardView>,
    pub placeholder_title: &'static str,
    pub placeholder_hint: &'static str,
    pub no_slots: &'static str,
    pub no_agenda_items: &'static str,
}

impl PageData {
    pub fn new(
        owner: &Owner,
        form: FormInput,
        citations: Vec<Citation>,
        view: ResponseView,
    ) -> Self {
        let hint = form.intent_hint;
        Self {
            owner_name: owner.name.clone(),
            owner_timezone: owner.timezone.name().to_string(),
            owner_email: owner.email.clone(),
            model: String::new(),
            alert: None,
            in_flight: false,
            form,
            hint_meeting: hint == IntentHint::Meeting,
            hint_info: hint == IntentHint::Info,
            hint_unknown: hint == IntentHint::Unknown,
            citations,
            card: view.card().cloned(),
            placeholder_title: PLACEHOLDER_TITLE,
            placeholder_hint: PLACEHOLDER_HINT,
            no_slots: NO_SLOTS,
            no_agenda_items: NO_AGENDA_ITEMS,
        }
    }
}

pub fn render_page(templates: &Handlebars, data: &PageData) -> anyhow::Result<String> {
    Ok(templates.render(PAGE_TEMPLATE, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twin::StaticCitations;
    use crate::twin::CitationSource;
    use crate::twin::parse_response;

    fn page(output: Option<&str>) -> String {
        let resp = output.map(|json| parse_response(json).unwrap());
        let view = ResponseView::from_output(resp.as_ref(), "Asia/Kolkata");
        let data = PageData::new(
            &Owner::default(),
            FormInput::default(),
            StaticCitations.citations(),
            view,
        );
        render_page(&templates(), &data).unwrap()
    }

    #[test]
    fn test_placeholder_page() {
        let html = page(None);
        assert!(html.contains("No Data Generated"));
        assert!(!html.contains("class=\"card\""));
        assert!(html.contains("<span class=\"owner-email\">pragya@acmecorp.com</span>"));
        assert!(html.contains("value=\"Rhea\""));
        assert!(html.contains("<option value=\"MEETING\" selected>"));
        assert_eq!(html.matches("<li title=").count(), 5);
    }

    #[test]
    fn test_brief_headings_are_bold() {
        let html = page(Some(
            r#"{"intent": "INFO", "mini_brief": "Goal: Decide.\nContext: Launch.\nNext Steps: Meet."}"#,
        ));
        assert!(html.contains(r#"<strong class="brief-heading">Goal:</strong>"#));
        assert!(html.contains(r#"<strong class="brief-heading">Context:</strong>"#));
        assert!(html.contains(r#"<strong class="brief-heading">Next Steps:</strong>"#));
        assert_eq!(html.matches("Goal:").count(), 1);
        assert_eq!(html.matches("Next Steps:").count(), 1);
    }

    #[test]
    fn test_one_question_one_item() {
        let html = page(Some(r#"{"intent": "INFO", "questions": ["Who decides?"]}"#));
        assert_eq!(html.matches("<li class=\"question\">").count(), 1);

        let html = page(Some(r#"{"intent": "INFO", "questions": []}"#));
        assert!(!html.contains("Clarifying Questions Needed"));
    }

    #[test]
    fn test_meeting_regions() {
        let html = page(Some(
            r#"{"intent": "MEETING", "agenda": {"title": "Review", "duration_min": 25, "items": ["Intro (2m)"]},
                "rendered_slots": ["Tue, 2 Dec 10:00–10:25 IST"]}"#,
        ));
        assert!(html.contains("Meeting Proposal"));
        assert!(html.contains("25 min"));
        assert!(html.contains(r#"<button type="button" class="slot">Tue, 2 Dec 10:00–10:25 IST</button>"#));

        let html = page(Some(r#"{"intent": "INFO", "rendered_slots": ["Tue"]}"#));
        assert!(!html.contains("Meeting Proposal"));
        assert!(!html.contains("class=\"slot\""));
    }

    #[test]
    fn test_citations_footer() {
        let html = page(Some(r#"{"intent": "INFO", "citations_used": []}"#));
        assert!(!html.contains("Citations Used:"));

        let html = page(Some(r#"{"intent": "INFO", "citations_used": ["FMCG Case Note.pdf"]}"#));
        assert!(html.contains(r#"<span class="citation">FMCG Case Note.pdf</span>"#));
    }

    #[test]
    fn test_model_output_is_escaped() {
        let html = page(Some(r#"{"intent": "INFO", "notes_for_orchestrator": "<script>x</script>"}"#));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
