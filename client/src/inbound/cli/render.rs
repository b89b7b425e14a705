//! Plain-text rendering for the console.
//!
//! Every function returns lines without trailing newlines so the binary can
//! decide where they go.

use crate::domain::{CatalogPage, DATE_FORMAT, FieldReport, Product, ProductField};

/// Render the visible catalog page as an aligned table with a footer.
pub fn render_page(page: &CatalogPage) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(error) = &page.error {
        lines.push(format!("error: {error}"));
    }
    if page.rows.is_empty() {
        lines.push(if page.search_term.trim().is_empty() {
            "No products.".to_owned()
        } else {
            format!("No products match {:?}.", page.search_term.trim())
        });
    } else {
        let id_width = column_width("ID", page.rows.iter().map(|row| row.id.as_str()));
        let name_width = column_width("NAME", page.rows.iter().map(|row| row.name.as_str()));
        lines.push(format!(
            "{:<id_width$}  {:<name_width$}  {:<10}  {:<10}  DESCRIPTION",
            "ID", "NAME", "RELEASE", "REVISION"
        ));
        for row in &page.rows {
            lines.push(format!(
                "{:<id_width$}  {:<name_width$}  {}  {}  {}",
                row.id.as_str(),
                row.name,
                row.date_release.format(DATE_FORMAT),
                row.date_revision.format(DATE_FORMAT),
                row.description,
            ));
        }
    }
    let summary = &page.summary;
    lines.push(format!(
        "Page {} of {} | {} results | {} per page",
        summary.current_page, summary.total_pages, summary.total_results, summary.page_size
    ));
    lines
}

/// Render one product as labelled fields.
pub fn render_product(product: &Product) -> Vec<String> {
    vec![
        format!("id:            {}", product.id),
        format!("name:          {}", product.name),
        format!("description:   {}", product.description),
        format!("logo:          {}", product.logo),
        format!("date_release:  {}", product.date_release.format(DATE_FORMAT)),
        format!("date_revision: {}", product.date_revision.format(DATE_FORMAT)),
    ]
}

/// Render the first failing rule of each field.
pub fn render_field_reports(
    reports: impl IntoIterator<Item = (ProductField, FieldReport)>,
) -> Vec<String> {
    reports
        .into_iter()
        .filter_map(|(field, report)| {
            report
                .message()
                .map(|message| format!("{}: {message}", field_label(field)))
        })
        .collect()
}

/// Wire name of a form field.
pub fn field_label(field: ProductField) -> &'static str {
    match field {
        ProductField::Id => "id",
        ProductField::Name => "name",
        ProductField::Description => "description",
        ProductField::Logo => "logo",
        ProductField::DateRelease => "date_release",
        ProductField::DateRevision => "date_revision",
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|value| value.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or_default()
}
