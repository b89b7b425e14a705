//! Tests for the product form session.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockCatalogGateway;

struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    fn on(date: NaiveDate) -> Self {
        let now = date
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
            .and_local_timezone(Local)
            .earliest()
            .expect("representable local time");
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn today() -> NaiveDate {
    date(2026, 10, 16)
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::on(today()))
}

fn create_form(gateway: &Arc<MockCatalogGateway>) -> ProductForm<MockCatalogGateway> {
    ProductForm::create(UniquenessChecker::new(Arc::clone(gateway)), clock())
}

fn stored_product() -> Product {
    Product {
        id: ProductId::new("trj-crd"),
        name: "Tarjeta Credito".to_owned(),
        description: "Tarjeta de consumo bajo modalidad de credito".to_owned(),
        logo: "https://cdn.example.test/trj-crd.png".to_owned(),
        date_release: date(2026, 12, 1),
        date_revision: date(2027, 12, 1),
    }
}

fn fill_text_fields(form: &mut ProductForm<MockCatalogGateway>) {
    form.set_name("Gold card");
    form.set_description("Credit card with cashback");
    form.set_logo("https://cdn.example.test/gold.png");
}

#[test]
fn create_form_starts_today_with_a_derived_revision() {
    let form = create_form(&Arc::new(MockCatalogGateway::new()));

    assert!(!form.is_edit());
    assert_eq!(form.mode(), &FormMode::Create);
    assert_eq!(form.date_release(), "2026-10-16");
    assert_eq!(form.date_revision(), Some(date(2027, 10, 16)));
    assert_eq!(
        form.invalid_fields(),
        [ProductField::Id, ProductField::Name, ProductField::Description, ProductField::Logo]
    );
}

#[rstest]
#[case("2026-11-16", Some(date(2027, 11, 16)))]
#[case("2028-02-29", Some(date(2029, 2, 28)))]
#[case("next week", None)]
fn release_date_drives_the_revision_date(
    #[case] release: &str,
    #[case] revision: Option<NaiveDate>,
) {
    let mut form = create_form(&Arc::new(MockCatalogGateway::new()));
    form.set_date_release(release);
    assert_eq!(form.date_revision(), revision);
}

#[test]
fn unparsable_release_date_fails_both_date_fields() {
    let mut form = create_form(&Arc::new(MockCatalogGateway::new()));
    form.set_date_release("next week");

    assert_eq!(
        form.report(ProductField::DateRelease).first(),
        Some(FieldError::InvalidDate)
    );
    assert_eq!(
        form.report(ProductField::DateRevision).message().as_deref(),
        Some("This field is required!")
    );
}

#[tokio::test(start_paused = true)]
async fn release_date_in_the_past_blocks_submission() {
    let mut gateway = MockCatalogGateway::new();
    gateway.expect_verify_product_id().return_const(Ok(false));
    gateway.expect_create_product().times(0);
    let gateway = Arc::new(gateway);

    let mut form = create_form(&gateway);
    fill_text_fields(&mut form);
    let outcome = form.set_id("gold-1").await;
    assert!(form.apply_id_check(outcome));
    form.set_date_release("2026-10-15");

    assert_eq!(
        form.report(ProductField::DateRelease).message().as_deref(),
        Some("Date must be today or later")
    );
    let error = form.submit(&gateway).await.expect_err("submission is blocked");
    assert_eq!(
        error,
        SubmitError::Invalid {
            fields: vec![ProductField::DateRelease],
        }
    );
}

#[tokio::test(start_paused = true)]
async fn taken_identifier_is_reported_and_blocks_submission() {
    let mut gateway = MockCatalogGateway::new();
    gateway
        .expect_verify_product_id()
        .with(eq(ProductId::new("newid")))
        .times(1)
        .return_once(|_| Ok(true));
    gateway.expect_create_product().times(0);
    let gateway = Arc::new(gateway);

    let mut form = create_form(&gateway);
    fill_text_fields(&mut form);
    let outcome = form.set_id("newid").await;
    assert!(form.apply_id_check(outcome));

    assert_eq!(
        form.report(ProductField::Id).message().as_deref(),
        Some("ID not valid!")
    );
    let error = form.submit(&gateway).await.expect_err("submission is blocked");
    assert_eq!(
        error,
        SubmitError::Invalid {
            fields: vec![ProductField::Id],
        }
    );
}

#[tokio::test(start_paused = true)]
async fn length_message_wins_over_a_stale_conflict() {
    let mut gateway = MockCatalogGateway::new();
    gateway
        .expect_verify_product_id()
        .times(1)
        .return_once(|_| Ok(true));
    let gateway = Arc::new(gateway);

    let mut form = create_form(&gateway);
    let outcome = form.set_id("newid").await;
    form.apply_id_check(outcome);
    let outcome = form.set_id("ab").await;
    form.apply_id_check(outcome);

    assert_eq!(
        form.report(ProductField::Id).errors(),
        [FieldError::TooShort { min: 3 }]
    );
}

#[tokio::test(start_paused = true)]
async fn pending_identifier_check_blocks_submission() {
    let mut gateway = MockCatalogGateway::new();
    gateway.expect_create_product().times(0);
    let gateway = Arc::new(gateway);

    let mut form = create_form(&gateway);
    fill_text_fields(&mut form);
    let _pending = form.set_id("gold-1");

    assert!(form.is_id_check_pending());
    let error = form.submit(&gateway).await.expect_err("submission is blocked");
    assert_eq!(error, SubmitError::Pending);
}

#[tokio::test(start_paused = true)]
async fn only_the_latest_identifier_check_is_applied() {
    let mut gateway = MockCatalogGateway::new();
    gateway
        .expect_verify_product_id()
        .with(eq(ProductId::new("gold-12")))
        .times(1)
        .return_once(|_| Ok(false));
    let gateway = Arc::new(gateway);

    let mut form = create_form(&gateway);
    let first = form.set_id("gold-1");
    let second = form.set_id("gold-12");
    let (first, second) = tokio::join!(first, second);

    assert!(!form.apply_id_check(first));
    assert!(form.is_id_check_pending());
    assert!(form.apply_id_check(second));
    assert!(!form.is_id_check_pending());
    assert_eq!(form.id(), "gold-12");
}

#[tokio::test(start_paused = true)]
async fn valid_create_form_posts_the_product() {
    let mut gateway = MockCatalogGateway::new();
    gateway.expect_verify_product_id().return_const(Ok(false));
    gateway
        .expect_create_product()
        .withf(|product| {
            product.id.as_str() == "gold-1"
                && product.date_release == date(2026, 11, 16)
                && product.date_revision == date(2027, 11, 16)
        })
        .times(1)
        .return_once(|product| {
            Ok(ProductMutation {
                message: "Product added successfully".to_owned(),
                data: product.clone(),
            })
        });
    let gateway = Arc::new(gateway);

    let mut form = create_form(&gateway);
    fill_text_fields(&mut form);
    form.set_date_release("2026-11-16");
    let outcome = form.set_id("gold-1").await;
    form.apply_id_check(outcome);

    let mutation = form.submit(&gateway).await.expect("product is created");
    assert_eq!(mutation.message, "Product added successfully");
    assert!(!form.is_submitting());
    assert_eq!(form.error(), None);
}

#[tokio::test(start_paused = true)]
async fn rejected_create_keeps_the_server_message() {
    let mut gateway = MockCatalogGateway::new();
    gateway.expect_verify_product_id().return_const(Ok(false));
    gateway
        .expect_create_product()
        .times(1)
        .return_once(|_| Err(CatalogGatewayError::status_code(400, "invalid request")));
    let gateway = Arc::new(gateway);

    let mut form = create_form(&gateway);
    fill_text_fields(&mut form);
    let outcome = form.set_id("gold-1").await;
    form.apply_id_check(outcome);

    let error = form.submit(&gateway).await.expect_err("server rejects");
    assert_eq!(error.to_string(), "invalid request");
    assert_eq!(form.error(), Some("invalid request"));
    assert!(!form.is_submitting());
}

#[tokio::test(start_paused = true)]
async fn edit_form_locks_the_identifier_and_sends_a_full_patch() {
    let mut gateway = MockCatalogGateway::new();
    gateway.expect_verify_product_id().times(0);
    gateway
        .expect_update_product()
        .withf(|id, patch| {
            id.as_str() == "trj-crd"
                && patch.name.as_deref() == Some("Tarjeta Platino")
                && patch.date_revision == Some(date(2027, 12, 1))
        })
        .times(1)
        .return_once(|_, _| {
            let mut data = stored_product();
            data.name = "Tarjeta Platino".to_owned();
            Ok(ProductMutation {
                message: "Product updated successfully".to_owned(),
                data,
            })
        });
    let gateway = Arc::new(gateway);

    let mut form = ProductForm::edit(
        stored_product(),
        UniquenessChecker::new(Arc::clone(&gateway)),
        clock(),
    );
    let outcome = form.set_id("other-id").await;
    assert!(form.apply_id_check(outcome));
    assert_eq!(form.id(), "trj-crd");

    form.set_name("Tarjeta Platino");
    let mutation = form.submit(&gateway).await.expect("product is updated");
    assert_eq!(mutation.data.name, "Tarjeta Platino");
}

#[test]
fn reset_restores_the_initial_values() {
    let gateway = Arc::new(MockCatalogGateway::new());

    let mut create = create_form(&gateway);
    fill_text_fields(&mut create);
    create.set_date_release("2027-01-01");
    create.reset();
    assert_eq!(create.name(), "");
    assert_eq!(create.date_release(), "2026-10-16");
    assert_eq!(create.date_revision(), Some(date(2027, 10, 16)));

    let mut edit = ProductForm::edit(
        stored_product(),
        UniquenessChecker::new(Arc::clone(&gateway)),
        clock(),
    );
    edit.set_description("Something else entirely");
    edit.set_date_release("2027-03-01");
    edit.reset();
    assert_eq!(edit.description(), stored_product().description);
    assert_eq!(edit.date_release(), "2026-12-01");
    assert_eq!(edit.date_revision(), Some(date(2027, 12, 1)));
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_an_identifier_check_still_in_its_debounce() {
    let mut gateway = MockCatalogGateway::new();
    gateway.expect_verify_product_id().times(0);
    gateway.expect_create_product().times(0);
    let gateway = Arc::new(gateway);

    let mut form = create_form(&gateway);
    let pending = form.set_id("taken1");
    form.reset();
    assert!(!form.is_id_check_pending());

    fill_text_fields(&mut form);
    let error = form.submit(&gateway).await.expect_err("identifier is empty");
    assert_eq!(
        error,
        SubmitError::Invalid {
            fields: vec![ProductField::Id],
        }
    );

    let outcome = pending.await;
    assert!(matches!(outcome, CheckOutcome::Superseded { .. }));
    assert!(!form.apply_id_check(outcome));
    assert_eq!(form.id(), "");
    assert_eq!(
        form.report(ProductField::Id).errors(),
        [FieldError::Required]
    );
}

#[tokio::test(start_paused = true)]
async fn check_resolved_before_reset_is_not_applied_after_it() {
    let mut gateway = MockCatalogGateway::new();
    gateway
        .expect_verify_product_id()
        .with(eq(ProductId::new("taken1")))
        .times(1)
        .return_once(|_| Ok(true));
    let gateway = Arc::new(gateway);

    let mut form = create_form(&gateway);
    let outcome = form.set_id("taken1").await;
    assert!(matches!(
        outcome,
        CheckOutcome::Resolved {
            conflict: Some(_),
            ..
        }
    ));
    form.reset();

    assert!(!form.apply_id_check(outcome));
    assert_eq!(
        form.report(ProductField::Id).errors(),
        [FieldError::Required]
    );
}

#[tokio::test]
async fn load_for_edit_fills_the_form_from_the_catalog() {
    let mut gateway = MockCatalogGateway::new();
    gateway
        .expect_get_product()
        .with(eq(ProductId::new("trj-crd")))
        .times(1)
        .return_once(|_| Ok(Some(stored_product())));
    let gateway = Arc::new(gateway);

    let form = ProductForm::load_for_edit(
        &*gateway,
        &ProductId::new("trj-crd"),
        UniquenessChecker::new(Arc::clone(&gateway)),
        clock(),
    )
    .await
    .expect("product exists");

    assert!(form.is_edit());
    assert!(matches!(
        form.mode(),
        FormMode::Edit { original } if original.id.as_str() == "trj-crd"
    ));
    assert_eq!(form.name(), "Tarjeta Credito");
    assert!(form.is_valid());
}

#[tokio::test]
async fn load_for_edit_reports_missing_products() {
    let mut gateway = MockCatalogGateway::new();
    gateway.expect_get_product().return_once(|_| Ok(None));
    let gateway = Arc::new(gateway);

    let result = ProductForm::load_for_edit(
        &*gateway,
        &ProductId::new("ghost"),
        UniquenessChecker::new(Arc::clone(&gateway)),
        clock(),
    )
    .await;

    let Err(error) = result else {
        panic!("expected a missing product error");
    };
    assert_eq!(error.to_string(), "product not found");
    assert_eq!(
        error,
        FormLoadError::NotFound {
            id: ProductId::new("ghost"),
        }
    );
}
