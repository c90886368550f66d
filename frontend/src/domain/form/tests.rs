//! Tests for the customer form state machine.

use std::sync::Arc;

use super::*;
use crate::domain::FieldError;
use crate::domain::ports::MockCustomerTransport;
use crate::test_support::{RecordingNavigator, RecordingNotifier, customer};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};

struct Harness {
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
}

impl Harness {
    fn ports(&self, transport: MockCustomerTransport) -> ViewPorts {
        ViewPorts::new(
            Arc::new(transport),
            self.notifier.clone(),
            self.navigator.clone(),
        )
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        notifier: Arc::new(RecordingNotifier::default()),
        navigator: Arc::new(RecordingNavigator::default()),
    }
}

fn id(raw: &str) -> CustomerId {
    CustomerId::new(raw).expect("valid id")
}

fn filled_create_form() -> CustomerForm {
    let mut form = CustomerForm::new(None);
    assert!(form.set_name("Ann Smith"));
    assert!(form.set_email("ann@example.com"));
    assert!(form.set_address("1 Main St"));
    form
}

#[test]
fn create_mode_starts_ready_with_blank_active_values() {
    let form = CustomerForm::new(None);
    assert_eq!(form.mode(), &FormMode::Create);
    assert_eq!(form.phase(), FormPhase::Ready);
    assert_eq!(form.values(), &CustomerFields::default());
    assert_eq!(form.title(), "Add New Customer");
    assert_eq!(form.submit_label(), "Create Customer");
    assert_eq!(form.status_text(), "Active");
    assert!(form.errors().is_empty());
}

#[test]
fn edit_mode_blocks_input_until_loaded() {
    let mut form = CustomerForm::new(Some(id("9")));
    assert_eq!(form.phase(), FormPhase::InitialLoading);
    assert_eq!(form.title(), "Edit Customer");
    assert!(!form.set_name("Ann"));
    assert!(!form.toggle_status());
    assert!(!form.can_submit());
    assert_eq!(form.begin_submit(), Ok(None));
}

#[test]
fn changing_a_field_updates_its_invalid_sub_state() {
    let mut form = CustomerForm::new(None);
    form.set_name("R2D2");
    assert_eq!(form.errors().get(Field::Name), Some(FieldError::InvalidFormat));
    assert!(!form.errors().is_invalid(Field::Email));

    form.set_name("Artoo");
    assert!(form.errors().is_empty());
}

#[test]
fn values_are_not_trimmed() {
    let mut form = CustomerForm::new(None);
    form.set_name("  Ann  ");
    assert_eq!(form.values().name, "  Ann  ");
    assert!(!form.errors().is_invalid(Field::Name));
}

#[test]
fn toggling_twice_restores_the_status() {
    let mut form = CustomerForm::new(None);
    let original = form.values().status;
    assert!(form.toggle_status());
    assert_eq!(form.status_text(), "Inactive");
    assert!(form.toggle_status());
    assert_eq!(form.values().status, original);
}

#[rstest]
fn cancel_navigates_to_the_list_without_saving(harness: Harness) {
    let mut form = filled_create_form();
    assert!(form.cancel(harness.navigator.as_ref()));
    assert_eq!(form.phase(), FormPhase::Closed);
    assert_eq!(harness.navigator.routes(), vec![Route::List]);
    assert!(harness.notifier.events().is_empty());
    assert!(!form.cancel(harness.navigator.as_ref()));
}

#[rstest]
#[tokio::test]
async fn invalid_forms_are_never_sent(harness: Harness) {
    let mut transport = MockCustomerTransport::new();
    transport.expect_create().never();
    let ports = harness.ports(transport);

    let mut form = CustomerForm::new(None);
    form.set_email("not-an-email");

    let error = form.submit(&ports).await.expect_err("validation must fail");
    let FlowError::Validation(errors) = &error else {
        panic!("expected validation failure, got {error:?}");
    };
    assert_eq!(errors.get(Field::Name), Some(FieldError::Required));
    assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidFormat));
    assert_eq!(form.phase(), FormPhase::Ready);
    assert!(harness.notifier.events().is_empty());
    assert!(harness.navigator.routes().is_empty());
}

#[rstest]
fn overlong_names_block_submission() {
    let mut form = filled_create_form();
    form.set_name("a".repeat(101));

    let error = form.begin_submit().expect_err("too long");
    assert!(matches!(error, FlowError::Validation(_)));
    assert_eq!(
        form.errors().get(Field::Name),
        Some(FieldError::TooLong { max: 100 })
    );
}

#[test]
fn submit_is_a_no_op_while_submitting() {
    let mut form = filled_create_form();
    let request = form.begin_submit().expect("valid form");
    assert!(matches!(request, Some(SubmitRequest::Create(_))));
    assert_eq!(form.phase(), FormPhase::Submitting);
    assert_eq!(form.submit_label(), "Saving...");

    assert_eq!(form.begin_submit(), Ok(None));
    assert!(!form.set_name("Changed"));
    assert!(!form.toggle_status());
    assert_eq!(form.values().name, "Ann Smith");
}

#[rstest]
#[tokio::test]
async fn create_sends_current_values_once_and_returns_to_the_list(harness: Harness) {
    let expected = CustomerFields {
        name: "Ann Smith".to_owned(),
        email: "ann@example.com".to_owned(),
        address: "1 Main St".to_owned(),
        status: false,
    };
    let mut transport = MockCustomerTransport::new();
    transport
        .expect_create()
        .with(eq(expected.clone()))
        .times(1)
        .returning(|_| Ok(Some(customer("31", "Ann Smith"))));
    transport.expect_update().never();
    let ports = harness.ports(transport);

    let mut form = filled_create_form();
    form.toggle_status();
    let saved = form.submit(&ports).await.expect("create succeeds");

    assert_eq!(saved.map(|saved| saved.id), Some(id("31")));
    assert_eq!(form.phase(), FormPhase::Closed);
    assert_eq!(
        harness.notifier.successes(),
        vec!["Customer created successfully".to_owned()]
    );
    assert_eq!(harness.navigator.routes(), vec![Route::List]);
}

#[rstest]
#[tokio::test]
async fn update_failure_keeps_values_and_stays_put(harness: Harness) {
    let mut transport = MockCustomerTransport::new();
    transport
        .expect_fetch_one()
        .with(eq(id("7")))
        .times(1)
        .returning(|_| Ok(customer("7", "Ann Smith")));
    transport
        .expect_update()
        .withf(|target, fields| target.as_ref() == "7" && fields.name == "Ann Jones")
        .times(1)
        .returning(|_, _| {
            Err(CustomerTransportError::status(
                500_u16,
                "Error updating customer: duplicate email",
            ))
        });
    let ports = harness.ports(transport);

    let mut form = CustomerForm::new(Some(id("7")));
    form.load(&ports).await.expect("load succeeds");
    form.set_name("Ann Jones");
    let before = form.values().clone();

    let error = form.submit(&ports).await.expect_err("update fails");
    assert!(matches!(error, FlowError::Transport(_)));
    assert_eq!(form.phase(), FormPhase::Ready);
    assert_eq!(form.values(), &before);
    assert_eq!(
        harness.notifier.errors(),
        vec!["Failed to update customer: Error updating customer: duplicate email".to_owned()]
    );
    assert!(harness.navigator.routes().is_empty());
}

#[rstest]
#[tokio::test]
async fn create_acknowledged_without_a_record_still_succeeds(harness: Harness) {
    let mut transport = MockCustomerTransport::new();
    transport.expect_create().times(1).returning(|_| Ok(None));
    let ports = harness.ports(transport);

    let mut form = filled_create_form();
    let saved = form.submit(&ports).await.expect("create succeeds");

    assert_eq!(saved, None);
    assert_eq!(form.phase(), FormPhase::Closed);
    assert!(!form.can_submit());
    assert_eq!(
        harness.notifier.successes(),
        vec!["Customer created successfully".to_owned()]
    );
    assert!(harness.notifier.errors().is_empty());
    assert_eq!(harness.navigator.routes(), vec![Route::List]);
}

#[rstest]
#[tokio::test]
async fn failure_without_payload_uses_the_fallback_text(harness: Harness) {
    let mut transport = MockCustomerTransport::new();
    transport
        .expect_create()
        .times(1)
        .returning(|_| Err(CustomerTransportError::transport("connection refused")));
    let ports = harness.ports(transport);

    let mut form = filled_create_form();
    let _ = form.submit(&ports).await;

    assert_eq!(
        harness.notifier.errors(),
        vec!["Failed to create customer: An error occurred".to_owned()]
    );
    assert!(form.can_submit());
}

#[rstest]
fn outcomes_after_closing_are_discarded(harness: Harness) {
    let mut form = filled_create_form();
    form.begin_submit().expect("valid form");
    form.phase = FormPhase::Closed;

    let outcome = form.finish_submit(
        Ok(Some(customer("1", "Ann Smith"))),
        harness.notifier.as_ref(),
        harness.navigator.as_ref(),
    );
    assert_eq!(outcome, Ok(None));
    assert!(harness.notifier.events().is_empty());
    assert!(harness.navigator.routes().is_empty());
}

#[rstest]
#[tokio::test]
async fn load_failure_notifies_and_leaves_the_form(harness: Harness) {
    let mut transport = MockCustomerTransport::new();
    transport
        .expect_fetch_one()
        .times(1)
        .returning(|_| Err(CustomerTransportError::status(404_u16, "Customer not found")));
    let ports = harness.ports(transport);

    let mut form = CustomerForm::new(Some(id("404")));
    let error = form.load(&ports).await.expect_err("load fails");

    assert!(matches!(error, FlowError::NotFoundOnLoad { ref id, .. } if id.as_ref() == "404"));
    assert_eq!(form.phase(), FormPhase::Closed);
    assert_eq!(form.values(), &CustomerFields::default());
    assert_eq!(
        harness.notifier.errors(),
        vec!["Failed to fetch customer details".to_owned()]
    );
    assert_eq!(harness.navigator.last(), Some(Route::List));
}

#[rstest]
#[tokio::test]
async fn create_mode_never_fetches(harness: Harness) {
    let mut transport = MockCustomerTransport::new();
    transport.expect_fetch_one().never();
    let ports = harness.ports(transport);

    let mut form = CustomerForm::new(None);
    assert_eq!(form.load(&ports).await, Ok(()));
    assert_eq!(form.phase(), FormPhase::Ready);
}

#[given("an edit form for a customer whose status was never set")]
fn an_edit_form_for_a_customer_whose_status_was_never_set() -> (CustomerForm, Customer) {
    let loaded = Customer {
        id: id("5"),
        name: "Ann".to_owned(),
        email: "a@b.com".to_owned(),
        address: Some(String::new()),
        status: None,
    };
    (CustomerForm::new(Some(id("5"))), loaded)
}

#[when("the customer finishes loading")]
fn the_customer_finishes_loading(setup: (CustomerForm, Customer)) -> CustomerForm {
    let (mut form, loaded) = setup;
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();
    form.apply_loaded(Ok(loaded), &notifier, &navigator)
        .expect("load applies");
    assert!(notifier.events().is_empty());
    assert!(navigator.routes().is_empty());
    form
}

#[then("the form shows the customer as active")]
fn the_form_shows_the_customer_as_active(form: CustomerForm) {
    assert_eq!(form.phase(), FormPhase::Ready);
    assert_eq!(
        form.values(),
        &CustomerFields {
            name: "Ann".to_owned(),
            email: "a@b.com".to_owned(),
            address: String::new(),
            status: true,
        }
    );
    assert_eq!(form.submit_label(), "Update Customer");
}

#[test]
fn loading_a_customer_without_status() {
    let setup = an_edit_form_for_a_customer_whose_status_was_never_set();
    let form = the_customer_finishes_loading(setup);
    the_form_shows_the_customer_as_active(form);
}
