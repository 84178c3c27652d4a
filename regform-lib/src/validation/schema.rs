//! Schema builder for declaring field and cross-field rules.

use email_address::{EmailAddress, Options};

use super::result::{ErrorKind, Issue, ValidationResult};
use crate::field::Field;
use crate::state::FormState;

/// Type alias for per-field rule closures.
type ValueCheck = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Type alias for whole-form refinement closures.
type StateCheck = Box<dyn Fn(&FormState) -> bool + Send + Sync>;

struct Rule {
    kind: ErrorKind,
    message: String,
    check: ValueCheck,
}

struct FieldEntry {
    field: Field,
    required_message: String,
    rules: Vec<Rule>,
}

struct Refinement {
    target: Field,
    depends_on: Vec<Field>,
    kind: ErrorKind,
    message: String,
    check: StateCheck,
}

/// A declarative set of rules evaluated against a [`FormState`].
///
/// # Example
///
/// ```
/// use regform_lib::{Field, FormState, Schema};
///
/// let schema = Schema::new()
///     .field(Field::Username)
///         .required("Username is required")
///         .min_length(3)
///     .build();
///
/// let state = FormState::new().update(Field::Username, "al");
/// assert!(schema.validate(&state).is_invalid());
/// ```
#[derive(Default)]
pub struct Schema {
    fields: Vec<FieldEntry>,
    refinements: Vec<Refinement>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring rules for a field.
    pub fn field(self, field: Field) -> FieldBuilder {
        FieldBuilder {
            schema: self,
            entry: FieldEntry {
                field,
                required_message: ErrorKind::Required.default_message(),
                rules: Vec::new(),
            },
        }
    }

    /// Add a cross-field check attributed to `target`.
    ///
    /// It runs after every per-field rule, and only if each field in
    /// `depends_on` produced no issue of its own.
    pub fn refine<F>(
        mut self,
        target: Field,
        depends_on: &[Field],
        kind: ErrorKind,
        check: F,
        msg: impl Into<String>,
    ) -> Self
    where
        F: Fn(&FormState) -> bool + Send + Sync + 'static,
    {
        self.refinements.push(Refinement {
            target,
            depends_on: depends_on.to_vec(),
            kind,
            message: msg.into(),
            check: Box::new(check),
        });
        self
    }

    /// All issues for `state`, in evaluation order.
    pub fn issues(&self, state: &FormState) -> Vec<Issue> {
        let mut issues = Vec::new();

        for entry in &self.fields {
            let Some(value) = state.get(entry.field) else {
                issues.push(Issue {
                    field: entry.field,
                    kind: ErrorKind::Required,
                    message: entry.required_message.clone(),
                });
                continue;
            };

            for rule in &entry.rules {
                if !(rule.check)(value) {
                    issues.push(Issue {
                        field: entry.field,
                        kind: rule.kind,
                        message: rule.message.clone(),
                    });
                }
            }
        }

        for refinement in &self.refinements {
            let blocked = refinement
                .depends_on
                .iter()
                .any(|dep| issues.iter().any(|issue| issue.field == *dep));
            if blocked {
                continue;
            }
            if !(refinement.check)(state) {
                issues.push(Issue {
                    field: refinement.target,
                    kind: refinement.kind,
                    message: refinement.message.clone(),
                });
            }
        }

        issues
    }

    /// Validate `state`. Pure; the same state always gives the same result.
    pub fn validate(&self, state: &FormState) -> ValidationResult {
        ValidationResult::from_issues(self.issues(state))
    }
}

/// Builder for adding rules to a single field.
pub struct FieldBuilder {
    schema: Schema,
    entry: FieldEntry,
}

impl FieldBuilder {
    /// Message reported when the field is absent.
    ///
    /// Absent fields are always reported; this only changes the wording.
    pub fn required(mut self, msg: impl Into<String>) -> Self {
        self.entry.required_message = msg.into();
        self
    }

    /// Add a custom rule.
    pub fn rule<F>(mut self, kind: ErrorKind, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.entry.rules.push(Rule {
            kind,
            message: msg.into(),
            check: Box::new(f),
        });
        self
    }

    /// Require at least `min` characters.
    pub fn min_length(self, min: usize) -> Self {
        let kind = ErrorKind::TooShort { min };
        self.rule(kind, move |v| v.chars().count() >= min, kind.default_message())
    }

    /// Require at most `max` characters.
    pub fn max_length(self, max: usize) -> Self {
        let kind = ErrorKind::TooLong { max };
        self.rule(kind, move |v| v.chars().count() <= max, kind.default_message())
    }

    /// Require a bare email address (`local@domain.tld`).
    pub fn email(self) -> Self {
        let kind = ErrorKind::InvalidFormat;
        self.rule(kind, is_bare_address, kind.default_message())
    }

    /// Replace the message of the most recently added rule.
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        if let Some(rule) = self.entry.rules.last_mut() {
            rule.message = msg.into();
        }
        self
    }

    /// Continue to the next field.
    pub fn field(self, field: Field) -> FieldBuilder {
        self.finalize().field(field)
    }

    /// Finish this field and add a cross-field check.
    pub fn refine<F>(
        self,
        target: Field,
        depends_on: &[Field],
        kind: ErrorKind,
        check: F,
        msg: impl Into<String>,
    ) -> Schema
    where
        F: Fn(&FormState) -> bool + Send + Sync + 'static,
    {
        self.finalize().refine(target, depends_on, kind, check, msg)
    }

    pub fn build(self) -> Schema {
        self.finalize()
    }

    fn finalize(self) -> Schema {
        let mut schema = self.schema;
        schema.fields.push(self.entry);
        schema
    }
}

/// Accepts `local@domain.tld` only: no display name, no domain literal, no
/// surrounding whitespace, and at least two domain labels.
fn is_bare_address(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let options = Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld();
    EmailAddress::parse_with_options(value, options).is_ok_and(|address| address.email() == value)
}
