//! Per-field validation and error annotation.

use pagedom::{Document, DomError, Element, Selector};

use super::rules::{self, FieldDescriptor, Verdict};

/// Class marking an invalid control.
pub const INVALID_CLASS: &str = "is-invalid";

/// Class of the message element placed next to an invalid control.
pub const FEEDBACK_CLASS: &str = "invalid-feedback";

/// Attribute linking a feedback message to the control it describes.
pub const FEEDBACK_FOR_ATTR: &str = "data-feedback-for";

/// Build the descriptor for the control with ID `field`.
pub fn descriptor(doc: &Document, field: &str) -> Result<FieldDescriptor, DomError> {
    doc.element(field).map(FieldDescriptor::from_element)
}

/// Validate one control and annotate it when invalid.
///
/// Any previous annotation is removed first, so repeated calls leave at
/// most one message in the DOM.
pub fn validate_field(doc: &mut Document, field: &str) -> Result<Verdict, DomError> {
    clear_field(doc, field)?;

    let verdict = rules::evaluate(&descriptor(doc, field)?);
    if let Some(message) = verdict.message.as_deref() {
        annotate(doc, field, message)?;
    }

    log::debug!("[validation] {field}: {verdict:?}");
    Ok(verdict)
}

/// Remove the invalid marker and the feedback message next to the control.
///
/// The message this module placed for `field` is removed; failing that, the
/// first server-rendered `.invalid-feedback` in the same parent.
pub fn clear_field(doc: &mut Document, field: &str) -> Result<(), DomError> {
    doc.element_mut(field)?.remove_class(INVALID_CLASS);

    let Some(parent) = doc.parent_id(field) else {
        return Ok(());
    };

    let feedback = Selector::parse(&format!(".{FEEDBACK_CLASS}"))?;
    let candidates = doc.select_within(&parent, &feedback)?;
    let owner = |id: &str| {
        doc.get(id)
            .and_then(|el| el.get_attr(FEEDBACK_FOR_ATTR))
            .map(str::to_string)
    };

    let target = candidates
        .iter()
        .find(|id| owner(id.as_str()).as_deref() == Some(field))
        .or_else(|| candidates.iter().find(|id| owner(id.as_str()).is_none()))
        .cloned();

    if let Some(message) = target {
        doc.remove(&message)?;
    }
    Ok(())
}

/// Whether the control currently carries the invalid marker.
pub fn has_error(doc: &Document, field: &str) -> bool {
    doc.get(field).is_some_and(|el| el.has_class(INVALID_CLASS))
}

fn annotate(doc: &mut Document, field: &str, message: &str) -> Result<(), DomError> {
    doc.element_mut(field)?.add_class(INVALID_CLASS);

    let parent = doc
        .parent_id(field)
        .ok_or_else(|| DomError::Detached(field.to_string()))?;

    doc.append_child(
        &parent,
        Element::div()
            .class(FEEDBACK_CLASS)
            .class("d-block")
            .attr(FEEDBACK_FOR_ATTR, field)
            .text(message),
    )
}
