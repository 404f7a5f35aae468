//! Product intake state machine.
//!
//! ```text
//! Scanning ──scan──▶ TypeSelected ──select_type──▶ SchemaLoading ──schema_loaded──▶ FormReady
//!                         ▲                              │                            │  ▲
//!                         └──────── schema_failed ───────┘                       submit│  │save_failed
//!                                                                                     ▼  │
//!                                   Saved ◀──────────── save_succeeded ────────────── Saving
//! ```
//!
//! `reset` returns to `Scanning` from anywhere. Every schema request carries
//! a [`SchemaTicket`] and every save a [`SaveTicket`]; only the most recently
//! issued ticket may complete `SchemaLoading` or `Saving`, so a response that
//! arrives after a type switch or a reset never lands on the newer item.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{CreateProductPayload, FormField, ProductType};

/// Workflow step shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkflowState {
    Scanning,
    TypeSelected,
    SchemaLoading,
    FormReady,
    Saving,
    Saved,
}

/// Tag of one schema request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemaTicket(u64);

/// Tag of one save request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SaveTicket(u64);

/// Payload to send, with the ticket its response must present.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSave {
    pub ticket: SaveTicket,
    pub payload: CreateProductPayload,
}

/// Outcome of delivering a schema or save response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Current,
    /// Superseded by a later request; ignored.
    Stale,
}

/// Transition not allowed from the current state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Scan result contained no usable value")]
    EmptyScan,

    #[error("Scan a product code before choosing its type")]
    NotScanned,

    #[error("Cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: WorkflowState,
    },
}

#[derive(Clone, Debug)]
pub struct Workflow {
    state: WorkflowState,
    scanned_id: Option<String>,
    product_type: Option<ProductType>,
    schema: Vec<FormField>,
    issued: u64,
    last_error: Option<String>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Scanning,
            scanned_id: None,
            product_type: None,
            schema: Vec::new(),
            issued: 0,
            last_error: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn scanned_id(&self) -> Option<&str> {
        self.scanned_id.as_deref()
    }

    pub fn product_type(&self) -> Option<ProductType> {
        self.product_type
    }

    pub fn schema(&self) -> &[FormField] {
        &self.schema
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Type can be (re)chosen once scanned, until saving starts.
    pub fn can_select_type(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::TypeSelected | WorkflowState::SchemaLoading | WorkflowState::FormReady
        )
    }

    /// Accepts the decoded values of one scan; the first non-empty wins.
    pub fn scan(&mut self, decoded: &[String]) -> Result<&str, WorkflowError> {
        if self.state != WorkflowState::Scanning {
            return Err(self.invalid("scan"));
        }
        let code = first_decoded(decoded).ok_or(WorkflowError::EmptyScan)?;

        self.state = WorkflowState::TypeSelected;
        self.last_error = None;
        Ok(self.scanned_id.insert(code).as_str())
    }

    /// Starts loading the schema for `product_type`, superseding any
    /// request still in flight.
    pub fn select_type(&mut self, product_type: ProductType) -> Result<SchemaTicket, WorkflowError> {
        if self.scanned_id.is_none() {
            return Err(WorkflowError::NotScanned);
        }
        if !self.can_select_type() {
            return Err(self.invalid("select a product type"));
        }

        self.issued += 1;
        self.product_type = Some(product_type);
        self.schema.clear();
        self.last_error = None;
        self.state = WorkflowState::SchemaLoading;
        Ok(SchemaTicket(self.issued))
    }

    pub fn is_current(&self, ticket: SchemaTicket) -> bool {
        self.state == WorkflowState::SchemaLoading && ticket.0 == self.issued
    }

    pub fn schema_loaded(&mut self, ticket: SchemaTicket, schema: Vec<FormField>) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }
        self.schema = schema;
        self.state = WorkflowState::FormReady;
        Applied::Current
    }

    pub fn schema_failed(&mut self, ticket: SchemaTicket, error: impl Into<String>) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }
        self.last_error = Some(error.into());
        self.state = WorkflowState::TypeSelected;
        Applied::Current
    }

    /// Builds the payload from the form values and enters `Saving`.
    pub fn submit(
        &mut self,
        attributes: Map<String, Value>,
    ) -> Result<PendingSave, WorkflowError> {
        let (WorkflowState::FormReady, Some(scanned_id), Some(product_type)) =
            (self.state, self.scanned_id.clone(), self.product_type)
        else {
            return Err(self.invalid("submit"));
        };

        self.issued += 1;
        self.state = WorkflowState::Saving;
        self.last_error = None;
        Ok(PendingSave {
            ticket: SaveTicket(self.issued),
            payload: CreateProductPayload {
                scanned_id,
                product_type,
                attributes,
            },
        })
    }

    pub fn is_current_save(&self, ticket: SaveTicket) -> bool {
        self.state == WorkflowState::Saving && ticket.0 == self.issued
    }

    pub fn save_succeeded(&mut self, ticket: SaveTicket) -> Applied {
        if !self.is_current_save(ticket) {
            return Applied::Stale;
        }
        self.state = WorkflowState::Saved;
        Applied::Current
    }

    /// Back to the form, keeping the schema; the error is kept for display.
    pub fn save_failed(&mut self, ticket: SaveTicket, error: impl Into<String>) -> Applied {
        if !self.is_current_save(ticket) {
            return Applied::Stale;
        }
        self.last_error = Some(error.into());
        self.state = WorkflowState::FormReady;
        Applied::Current
    }

    /// Starting over is offered except while a save is in flight.
    pub fn can_reset(&self) -> bool {
        self.state != WorkflowState::Saving
    }

    /// Starts over for the next item. Pending tickets become stale.
    pub fn reset(&mut self) {
        let issued = self.issued;
        *self = Self::new();
        self.issued = issued;
    }

    fn invalid(&self, action: &'static str) -> WorkflowError {
        WorkflowError::InvalidTransition {
            action,
            state: self.state,
        }
    }
}

/// First decoded value that is not blank, trimmed.
pub fn first_decoded(decoded: &[String]) -> Option<String> {
    decoded
        .iter()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;
    use crate::services::schema::mock_schema;
    use crate::types::FormField;
    use serde_json::json;

    fn scanned() -> Workflow {
        let mut wf = Workflow::new();
        wf.scan(&["QR123".to_string()]).unwrap();
        wf
    }

    #[test]
    fn test_scan_takes_first_non_empty() {
        let mut wf = Workflow::new();
        let decoded = vec!["".to_string(), "  ".to_string(), " QR9 ".to_string(), "QR10".to_string()];
        assert_eq!(wf.scan(&decoded).unwrap(), "QR9");
        assert_eq!(wf.state(), WorkflowState::TypeSelected);
        assert_eq!(wf.scanned_id(), Some("QR9"));
    }

    #[test]
    fn test_empty_scan_keeps_scanning() {
        let mut wf = Workflow::new();
        assert_eq!(wf.scan(&[]), Err(WorkflowError::EmptyScan));
        assert_eq!(wf.scan(&["".into()]), Err(WorkflowError::EmptyScan));
        assert_eq!(wf.state(), WorkflowState::Scanning);
    }

    #[test]
    fn test_type_requires_scan() {
        let mut wf = Workflow::new();
        assert_eq!(
            wf.select_type(ProductType::LooseGemstone),
            Err(WorkflowError::NotScanned)
        );
    }

    #[test]
    fn test_stale_schema_is_dropped() {
        let mut wf = scanned();
        let gem = wf.select_type(ProductType::LooseGemstone).unwrap();
        let jewelry = wf.select_type(ProductType::FinishedJewelry).unwrap();

        let jewelry_schema = mock_schema(ProductType::FinishedJewelry);
        assert_eq!(wf.schema_loaded(jewelry, jewelry_schema.clone()), Applied::Current);

        // older request resolves last
        let gem_schema = mock_schema(ProductType::LooseGemstone);
        assert_eq!(wf.schema_loaded(gem, gem_schema), Applied::Stale);

        assert_eq!(wf.state(), WorkflowState::FormReady);
        assert_eq!(wf.product_type(), Some(ProductType::FinishedJewelry));
        assert_eq!(wf.schema(), jewelry_schema.as_slice());
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut wf = scanned();
        let first = wf.select_type(ProductType::LooseGemstone).unwrap();
        let second = wf.select_type(ProductType::IdolCarving).unwrap();

        assert_eq!(wf.schema_failed(first, "timeout"), Applied::Stale);
        assert_eq!(wf.state(), WorkflowState::SchemaLoading);
        assert!(wf.is_current(second));

        assert_eq!(wf.schema_failed(second, "502"), Applied::Current);
        assert_eq!(wf.state(), WorkflowState::TypeSelected);
        assert_eq!(wf.last_error(), Some("502"));
    }

    #[test]
    fn test_reset_invalidates_pending_ticket() {
        let mut wf = scanned();
        let ticket = wf.select_type(ProductType::LooseGemstone).unwrap();
        wf.reset();
        wf.scan(&["QR456".into()]).unwrap();
        wf.select_type(ProductType::FinishedJewelry).unwrap();

        assert_eq!(wf.schema_loaded(ticket, vec![]), Applied::Stale);
        assert_eq!(wf.state(), WorkflowState::SchemaLoading);
    }

    #[test]
    fn test_save_failure_returns_to_form() {
        let mut wf = scanned();
        let ticket = wf.select_type(ProductType::FinishedJewelry).unwrap();
        wf.schema_loaded(ticket, mock_schema(ProductType::FinishedJewelry));

        let first = wf.submit(Map::new()).unwrap();
        assert_eq!(wf.state(), WorkflowState::Saving);
        assert!(!wf.can_select_type());
        assert!(!wf.can_reset());
        assert!(wf.select_type(ProductType::LooseGemstone).is_err());

        assert_eq!(
            wf.save_failed(first.ticket, "Network error: connection refused"),
            Applied::Current
        );
        assert_eq!(wf.state(), WorkflowState::FormReady);
        assert_eq!(wf.last_error(), Some("Network error: connection refused"));
        assert_eq!(wf.schema().len(), 3);

        let second = wf.submit(Map::new()).unwrap();
        // a late answer to the first attempt changes nothing
        assert_eq!(wf.save_succeeded(first.ticket), Applied::Stale);
        assert_eq!(wf.state(), WorkflowState::Saving);

        assert_eq!(wf.save_succeeded(second.ticket), Applied::Current);
        assert_eq!(wf.state(), WorkflowState::Saved);
        assert_eq!(wf.last_error(), None);
        assert!(wf.can_reset());
    }

    #[test]
    fn test_save_after_reset_does_not_touch_next_item() {
        let mut wf = Workflow::new();
        wf.scan(&["QR-A".into()]).unwrap();
        let ticket = wf.select_type(ProductType::LooseGemstone).unwrap();
        wf.schema_loaded(ticket, mock_schema(ProductType::LooseGemstone));
        let save_a = wf.submit(Map::new()).unwrap();

        wf.reset();
        wf.scan(&["QR-B".into()]).unwrap();
        let ticket = wf.select_type(ProductType::FinishedJewelry).unwrap();
        wf.schema_loaded(ticket, mock_schema(ProductType::FinishedJewelry));
        let save_b = wf.submit(Map::new()).unwrap();

        assert_eq!(wf.save_succeeded(save_a.ticket), Applied::Stale);
        assert_eq!(wf.state(), WorkflowState::Saving);

        assert_eq!(wf.save_failed(save_b.ticket, "Server error (500): boom"), Applied::Current);
        assert_eq!(wf.state(), WorkflowState::FormReady);
        assert_eq!(wf.scanned_id(), Some("QR-B"));
        assert_eq!(wf.last_error(), Some("Server error (500): boom"));
    }

    #[test]
    fn test_save_ticket_does_not_complete_schema_load() {
        let mut wf = scanned();
        let ticket = wf.select_type(ProductType::LooseGemstone).unwrap();
        wf.schema_loaded(ticket, mock_schema(ProductType::LooseGemstone));
        let save = wf.submit(Map::new()).unwrap();
        wf.save_failed(save.ticket, "offline");

        let reload = wf.select_type(ProductType::IdolCarving).unwrap();
        assert_eq!(wf.save_succeeded(save.ticket), Applied::Stale);
        assert_eq!(wf.state(), WorkflowState::SchemaLoading);
        assert!(wf.is_current(reload));
    }

    #[test]
    fn test_transitions_out_of_order() {
        let mut wf = Workflow::new();
        assert!(matches!(
            wf.submit(Map::new()),
            Err(WorkflowError::InvalidTransition { action: "submit", state: WorkflowState::Scanning })
        ));
        assert_eq!(wf.save_succeeded(SaveTicket(0)), Applied::Stale);
        assert_eq!(wf.save_failed(SaveTicket(0), "x"), Applied::Stale);
        assert_eq!(wf.state(), WorkflowState::Scanning);

        let mut wf = scanned();
        assert!(wf.scan(&["again".into()]).is_err());
        assert_eq!(wf.scanned_id(), Some("QR123"));
    }

    #[test]
    fn test_schema_change_rebuilds_form() {
        let mut wf = scanned();
        let first = wf.select_type(ProductType::LooseGemstone).unwrap();
        wf.schema_loaded(first, mock_schema(ProductType::LooseGemstone));

        let mut form = FormState::new(wf.schema());
        form.set_value("carat", "2.1");

        let second = wf.select_type(ProductType::FinishedJewelry).unwrap();
        wf.schema_loaded(second, mock_schema(ProductType::FinishedJewelry));
        form.rebuild(wf.schema());

        let keys: Vec<&str> = wf.schema().iter().map(|f: &FormField| f.key.as_str()).collect();
        assert_eq!(form.keys(), keys);
        assert_eq!(form.value("carat"), None);
        assert!(keys.iter().all(|k| form.raw(k).is_empty()));
    }

    #[test]
    fn test_end_to_end_loose_gemstone() {
        let mut wf = Workflow::new();
        wf.scan(&["QR123".into()]).unwrap();

        let ticket = wf.select_type(ProductType::LooseGemstone).unwrap();
        assert_eq!(wf.state(), WorkflowState::SchemaLoading);
        wf.schema_loaded(ticket, mock_schema(ProductType::LooseGemstone));
        assert_eq!(wf.state(), WorkflowState::FormReady);

        let mut form = FormState::new(wf.schema());
        assert_eq!(form.keys(), vec!["carat", "color", "clarity", "origin"]);

        form.set_value("carat", "1.2");
        form.set_value("color", "D");
        form.set_value("clarity", "VVS1");
        let attributes = form.submit().expect("all required fields filled");

        let PendingSave { ticket, payload } = wf.submit(attributes).unwrap();
        assert_eq!(payload.scanned_id, "QR123");
        assert_eq!(payload.product_type, ProductType::LooseGemstone);
        assert_eq!(
            json!(payload.attributes),
            json!({"carat": 1.2, "color": "D", "clarity": "VVS1", "origin": ""})
        );

        assert_eq!(wf.save_succeeded(ticket), Applied::Current);
        assert_eq!(wf.state(), WorkflowState::Saved);

        wf.reset();
        assert_eq!(wf.state(), WorkflowState::Scanning);
        assert_eq!(wf.scanned_id(), None);
    }
}
