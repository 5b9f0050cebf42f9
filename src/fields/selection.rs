//! Active field toggles for one (template, size), enforcing the field cap.

use std::collections::BTreeSet;
use thiserror::Error;

use super::{FieldId, counts_toward_cap, get_field_config, get_field_limit};
use crate::error::LabelError;
use crate::layout::{LabelLayout, LabelSize};

/// Why a field could not be activated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Field '{field}' is not available: {hint}")]
    Unsupported { field: FieldId, hint: &'static str },

    #[error("At most {cap} fields can be active on this label")]
    CapReached { cap: usize },
}

/// Set of checked fields in the field picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    template: LabelLayout,
    size: LabelSize,
    cap: usize,
    active: BTreeSet<FieldId>,
}

impl FieldSelection {
    pub fn new(template: LabelLayout, size: LabelSize) -> Self {
        Self {
            template,
            size,
            cap: get_field_limit(template, size),
            active: BTreeSet::new(),
        }
    }

    /// Activate comma-separated field names in order, as the field picker
    /// would. Stops at the first unknown, unsupported or over-cap field.
    pub fn from_names(
        template: LabelLayout,
        size: LabelSize,
        names: &str,
    ) -> Result<Self, LabelError> {
        let mut selection = Self::new(template, size);
        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let field =
                FieldId::parse(name).ok_or_else(|| LabelError::UnknownField(name.to_string()))?;
            selection.activate(field)?;
        }
        Ok(selection)
    }

    /// Override the cap (tests, or a stricter UI).
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn template(&self) -> LabelLayout {
        self.template
    }

    pub fn size(&self) -> LabelSize {
        self.size
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn is_active(&self, field: FieldId) -> bool {
        self.active.contains(&field)
    }

    pub fn active(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.active.iter().copied()
    }

    /// Active fields that occupy a capped slot.
    pub fn counted(&self) -> usize {
        self.active
            .iter()
            .filter(|f| counts_toward_cap(**f, self.template))
            .count()
    }

    /// Whether `field` could be switched on right now.
    pub fn can_activate(&self, field: FieldId) -> Result<(), SelectionError> {
        let config = get_field_config(self.template, self.size).get(field);
        if !config.supported {
            return Err(SelectionError::Unsupported {
                field,
                hint: config.hint.unwrap_or_default(),
            });
        }
        if self.is_active(field) || !counts_toward_cap(field, self.template) {
            return Ok(());
        }
        if self.counted() >= self.cap {
            return Err(SelectionError::CapReached { cap: self.cap });
        }
        Ok(())
    }

    pub fn activate(&mut self, field: FieldId) -> Result<(), SelectionError> {
        self.can_activate(field)?;
        self.active.insert(field);
        Ok(())
    }

    pub fn deactivate(&mut self, field: FieldId) {
        self.active.remove(&field);
    }

    /// Flip a field; returns the new state.
    pub fn toggle(&mut self, field: FieldId) -> Result<bool, SelectionError> {
        if self.is_active(field) {
            self.deactivate(field);
            Ok(false)
        } else {
            self.activate(field)?;
            Ok(true)
        }
    }

    /// Move to another (template, size), keeping what is still supported
    /// and fits the new cap, in field order. Returns the dropped fields.
    pub fn switch(&mut self, template: LabelLayout, size: LabelSize) -> Vec<FieldId> {
        let previous = std::mem::take(&mut self.active);
        self.template = template;
        self.size = size;
        self.cap = get_field_limit(template, size);

        let mut dropped = Vec::new();
        for field in previous {
            if self.activate(field).is_err() {
                dropped.push(field);
            }
        }
        dropped
    }
}
