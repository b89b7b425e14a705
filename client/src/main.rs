//! Console front end for the product catalog.
//!
//! Reads `CATALOG_*` settings, talks to the REST backend, and prints plain
//! text. Every failure ends the process with a non-zero status.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use catalog_client::domain::ports::CatalogGateway;
use catalog_client::domain::{
    CatalogEngine, CheckOutcome, ProductField, ProductForm, ProductId, SubmitError,
    UniquenessChecker,
};
use catalog_client::inbound::cli::{
    ConsoleSettings, render_field_reports, render_page, render_product,
};
use catalog_client::outbound::http::HttpCatalogGateway;
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use pagination::PageSize;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `catalog-console` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "catalog-console",
    about = "List, inspect, and edit financial products in the catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one page of the catalog.
    List {
        /// Case-insensitive text matched against name and description.
        #[arg(long)]
        search: Option<String>,
        /// Rows per page; overrides `CATALOG_PAGE_SIZE`.
        #[arg(long, value_name = "n")]
        page_size: Option<PageSize>,
        /// 1-based page number.
        #[arg(long, value_name = "n", default_value_t = 1)]
        page: usize,
    },
    /// Print one product.
    Show {
        /// Product identifier.
        id: String,
    },
    /// Report whether an identifier is free.
    CheckId {
        /// Candidate identifier.
        id: String,
        /// Identifier of the product being edited, if any.
        #[arg(long, value_name = "id")]
        current: Option<String>,
    },
    /// Create a product.
    Create {
        /// New product identifier.
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update an existing product.
    Update {
        /// Identifier of the product to update.
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a product.
    Delete {
        /// Identifier of the product to delete.
        id: String,
    },
}

/// Editable product fields; omitted values keep the form's current value.
#[derive(Debug, Args)]
struct FieldArgs {
    /// Display name.
    #[arg(long)]
    name: Option<String>,
    /// Free-text description.
    #[arg(long)]
    description: Option<String>,
    /// Logo URL.
    #[arg(long)]
    logo: Option<String>,
    /// Release date as `YYYY-MM-DD`; defaults to today on create.
    #[arg(long, value_name = "date")]
    date_release: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = ConsoleSettings::load_from_iter([OsString::from("catalog-console")])
        .wrap_err("failed to load CATALOG_* settings")?;
    let gateway = Arc::new(
        HttpCatalogGateway::new(settings.api_url()?, settings.request_timeout())
            .wrap_err("failed to build HTTP client")?,
    );
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let mut out = io::stdout().lock();

    match cli.command {
        Command::List {
            search,
            page_size,
            page,
        } => {
            let page_size = match page_size {
                Some(size) => size,
                None => settings.page_size()?,
            };
            list(&mut out, gateway, page_size, search, page).await
        }
        Command::Show { id } => {
            let product = gateway
                .get_product(&ProductId::new(id))
                .await?
                .ok_or_else(|| eyre!("product not found"))?;
            write_lines(&mut out, render_product(&product))
        }
        Command::CheckId { id, current } => {
            let checker = UniquenessChecker::with_debounce(gateway, settings.debounce());
            let current = current.map(ProductId::new);
            let outcome = checker.check(&id, current.as_ref()).await;
            let verdict = match outcome {
                CheckOutcome::Resolved {
                    conflict: Some(_), ..
                } => "taken",
                CheckOutcome::Resolved { conflict: None, .. } => "available",
                CheckOutcome::Superseded { .. } => "superseded",
            };
            writeln!(out, "{id}: {verdict}")?;
            Ok(())
        }
        Command::Create { id, fields } => {
            let checker =
                UniquenessChecker::with_debounce(Arc::clone(&gateway), settings.debounce());
            let mut form = ProductForm::create(checker, clock);
            fields.apply(&mut form);
            let outcome = form.set_id(id).await;
            form.apply_id_check(outcome);
            submit(&mut out, &mut form, &gateway).await
        }
        Command::Update { id, fields } => {
            let checker =
                UniquenessChecker::with_debounce(Arc::clone(&gateway), settings.debounce());
            let mut form =
                ProductForm::load_for_edit(&*gateway, &ProductId::new(id), checker, clock).await?;
            fields.apply(&mut form);
            submit(&mut out, &mut form, &gateway).await
        }
        Command::Delete { id } => delete(&mut out, gateway, &ProductId::new(id)).await,
    }
}

impl FieldArgs {
    fn apply<G>(self, form: &mut ProductForm<G>) {
        if let Some(name) = self.name {
            form.set_name(name);
        }
        if let Some(description) = self.description {
            form.set_description(description);
        }
        if let Some(logo) = self.logo {
            form.set_logo(logo);
        }
        if let Some(date_release) = self.date_release {
            form.set_date_release(date_release);
        }
    }
}

async fn list(
    out: &mut impl Write,
    gateway: Arc<HttpCatalogGateway>,
    page_size: PageSize,
    search: Option<String>,
    page: usize,
) -> Result<()> {
    let mut engine = CatalogEngine::with_page_size(gateway, page_size);
    engine.load().await;
    if let Some(error) = engine.state().error() {
        return Err(eyre!("{error}"));
    }
    if let Some(term) = search {
        engine.set_search_term(term);
    }
    for _ in 1..page {
        engine.next_page();
    }
    write_lines(out, render_page(&engine.snapshot()))
}

async fn submit(
    out: &mut impl Write,
    form: &mut ProductForm<HttpCatalogGateway>,
    gateway: &HttpCatalogGateway,
) -> Result<()> {
    match form.submit(gateway).await {
        Ok(mutation) => {
            writeln!(out, "{}", mutation.message)?;
            write_lines(out, render_product(&mutation.data))
        }
        Err(SubmitError::Invalid { fields }) => {
            let reports = fields
                .into_iter()
                .map(|field: ProductField| (field, form.report(field)));
            write_lines(out, render_field_reports(reports))?;
            Err(eyre!("product form has invalid fields"))
        }
        Err(error) => Err(error.into()),
    }
}

async fn delete(
    out: &mut impl Write,
    gateway: Arc<HttpCatalogGateway>,
    id: &ProductId,
) -> Result<()> {
    let mut engine = CatalogEngine::new(gateway);
    engine.load().await;
    if let Some(error) = engine.state().error() {
        return Err(eyre!("{error}"));
    }
    let product = engine
        .state()
        .product(id)
        .cloned()
        .ok_or_else(|| eyre!("product not found"))?;
    engine.request_delete(product);
    engine.confirm_delete().await;
    if let Some(error) = engine.state().error() {
        return Err(eyre!("{error}"));
    }
    writeln!(out, "deleted {id}")?;
    Ok(())
}

fn write_lines(out: &mut impl Write, lines: Vec<String>) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
