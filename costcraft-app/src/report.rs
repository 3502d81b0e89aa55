//! Drives the estimation wizard from a request file and renders the results:
//! a console cost breakdown, and optionally a CSV + markdown report written
//! into a timestamped run directory.

use crate::config::ReferenceData;
use anyhow::{bail, Context, Result};
use costcraft_core::{
    pricing,
    storage::FileStorage,
    store::RecordStore,
    workflow::EstimationWizard,
};
use costcraft_schemas::estimation::SavedEstimation;
use serde::Deserialize;
use std::{fs, path::Path};

/// A complete estimation request, usually read from `request.yaml`.
#[derive(Debug, Deserialize)]
pub struct EstimationRequest {
    pub product: ProductRequest,
    pub materials: Vec<MaterialRequest>,
    #[serde(default)]
    pub labor_cost: f64,
    #[serde(default)]
    pub other_costs: f64,
    pub profit_margin: Option<u32>,
    pub save: Option<SaveRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct MaterialRequest {
    pub name: String,
    pub quantity: f64,
    pub cost_per_unit: Option<f64>,
}

/// Optional instruction to persist the finished estimation.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub fn load_request(path: &Path) -> Result<EstimationRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {:?}", path))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Walks the wizard through all three steps for the request and prints the
/// pricing analysis. Saves the estimation when the request asks for it.
pub fn run_estimation(
    request: &EstimationRequest,
    reference: &ReferenceData,
    store: &mut RecordStore<FileStorage>,
    report_dir: Option<&Path>,
) -> Result<()> {
    let mut wizard = EstimationWizard::new(reference.catalog.clone());

    // Step 1: product details and bill of materials.
    println!(
        "\n--- [Wizard] Step {} of 3: Product Details ---",
        wizard.step().position()
    );
    wizard.set_name(&request.product.name);
    wizard.set_description(&request.product.description);
    wizard.set_category(&request.product.category);

    for material in &request.materials {
        wizard
            .add_material(&material.name, material.quantity, material.cost_per_unit)
            .with_context(|| format!("Could not add material '{}'", material.name))?;
        let added = wizard.draft().materials.last().unwrap();
        println!(
            "  + {:<16} qty {:>8.2}  @ {}",
            added.name,
            added.quantity,
            format_inr(added.cost_per_unit)
        );
    }

    if !wizard.advance() {
        let errors = wizard.errors();
        for message in [&errors.name, &errors.materials].into_iter().flatten() {
            eprintln!("  ! {}", message);
        }
        bail!("Estimation request failed validation");
    }

    // Step 2: additional costs.
    println!(
        "\n--- [Wizard] Step {} of 3: Additional Costs ---",
        wizard.step().position()
    );
    wizard.set_labor_cost(request.labor_cost);
    wizard.set_other_costs(request.other_costs);
    println!("  Labor:  {}", format_inr(wizard.draft().labor_cost));
    println!("  Other:  {}", format_inr(wizard.draft().other_costs));
    wizard.advance();

    // Step 3: pricing.
    if let Some(margin) = request.profit_margin {
        wizard.set_profit_margin(margin);
    }
    print_breakdown(&wizard);

    if let Some(dir) = report_dir {
        write_report_files(&wizard, dir)?;
    }

    if let Some(save) = &request.save {
        let saved = wizard.save(store, &save.name, &save.description)?;
        println!(
            "\nSaved estimation '{}' (id {}) at {}",
            saved.name, saved.id, saved.created_at
        );
    }

    Ok(())
}

fn print_breakdown(wizard: &EstimationWizard) {
    let draft = wizard.draft();
    let estimate = wizard.estimated_cost();
    let margin = wizard.profit_margin();
    let materials_sum = pricing::materials_subtotal(&draft.materials);
    let average = estimate.average();

    println!(
        "\n--- [Wizard] Step {} of 3: Pricing Analysis ---",
        wizard.step().position()
    );
    println!("========================================");
    println!("Cost Breakdown for '{}':", draft.name);
    println!("  - Materials:              {}", format_inr(materials_sum));
    println!("  - Labor:                  {}", format_inr(draft.labor_cost));
    println!("  - Other Costs:            {}", format_inr(draft.other_costs));
    println!("  --------------------------------------");
    println!(
        "  - Estimated Cost Range:   {} - {}",
        format_inr(estimate.min),
        format_inr(estimate.max)
    );
    println!("  - Total Production Cost:  {}", format_inr(average));
    println!(
        "  - Profit ({:>3}%):          {}",
        margin,
        format_inr(average * f64::from(margin) / 100.0)
    );
    println!(
        "  - Suggested Retail Price: {}",
        format_inr(wizard.suggested_price())
    );
    println!("========================================");
}

/// Writes `materials.csv` and `summary.md` into a timestamped run directory
/// under `base_dir` and prints where the report landed.
fn write_report_files(wizard: &EstimationWizard, base_dir: &Path) -> Result<()> {
    let draft = wizard.draft();
    let slug: String = draft
        .name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let run_dir = base_dir.join(format!(
        "{}_{}",
        slug,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ));
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create report directory {:?}", run_dir))?;

    let csv_path = run_dir.join("materials.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("Failed to create {:?}", csv_path))?;
    writer.write_record(["material", "quantity", "cost_per_unit", "subtotal"])?;
    for material in &draft.materials {
        writer.write_record([
            material.name.clone(),
            material.quantity.to_string(),
            material.cost_per_unit.to_string(),
            material.subtotal().to_string(),
        ])?;
    }
    writer.flush()?;

    let estimate = wizard.estimated_cost();
    let mut summary = format!("# Estimation Report: {}\n\n", draft.name);
    if !draft.description.is_empty() {
        summary.push_str(&format!("{}\n\n", draft.description));
    }
    summary.push_str("| Item | Amount |\n|------|--------|\n");
    summary.push_str(&format!(
        "| Materials | {} |\n",
        format_inr(pricing::materials_subtotal(&draft.materials))
    ));
    summary.push_str(&format!("| Labor | {} |\n", format_inr(draft.labor_cost)));
    summary.push_str(&format!(
        "| Other Costs | {} |\n",
        format_inr(draft.other_costs)
    ));
    summary.push_str(&format!(
        "| Estimated Cost Range | {} - {} |\n",
        format_inr(estimate.min),
        format_inr(estimate.max)
    ));
    summary.push_str(&format!(
        "| Profit Margin | {}% |\n",
        wizard.profit_margin()
    ));
    summary.push_str(&format!(
        "| Suggested Retail Price | {} |\n",
        format_inr(wizard.suggested_price())
    ));
    fs::write(run_dir.join("summary.md"), summary)?;

    println!("\nReport written to '{}'", run_dir.display());
    Ok(())
}

/// One-line rendering of a saved estimation for list output.
pub fn format_listing(record: &SavedEstimation) -> String {
    format!(
        "{}  {:<24} {} - {}  price {}  [{}]",
        format_date(&record.created_at),
        record.name,
        format_inr(record.estimated_cost.min),
        format_inr(record.estimated_cost.max),
        format_inr(record.suggested_price),
        record.id
    )
}

/// Full detail rendering for `show`.
pub fn print_details(record: &SavedEstimation) {
    println!("{}", record.name);
    println!("Created {}", format_date(&record.created_at));
    if !record.description.is_empty() {
        println!("\n{}", record.description);
    }

    println!("\nMaterials Used:");
    println!("  {:<18} {:>10} {:>14} {:>14}", "Material", "Quantity", "Cost/Unit", "Total");
    for material in &record.materials {
        println!(
            "  {:<18} {:>10.2} {:>14} {:>14}",
            material.name,
            material.quantity,
            format_inr(material.cost_per_unit),
            format_inr(material.subtotal())
        );
    }

    println!("\nAdditional Costs:");
    println!("  Labor Cost:    {}", format_inr(record.labor_cost));
    println!("  Other Costs:   {}", format_inr(record.other_costs));
    println!("  Profit Margin: {}%", record.profit_margin);

    println!("\nSummary:");
    println!(
        "  Estimated Cost Range:   {} - {}",
        format_inr(record.estimated_cost.min),
        format_inr(record.estimated_cost.max)
    );
    println!(
        "  Suggested Retail Price: {}",
        format_inr(record.suggested_price)
    );
}

fn format_date(iso: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(iso) {
        Ok(date) => date.format("%d %b %Y %H:%M").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Formats a currency amount with Indian digit grouping, e.g. `₹12,34,567`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    // Sign follows the rounded value, so -0.4 renders as ₹0.
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::new();
    let n = digits.len();
    for (i, c) in digits.chars().enumerate() {
        grouped.push(c);
        let remaining = n - i - 1;
        // Indian grouping: last three digits, then pairs.
        if remaining > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            grouped.push(',');
        }
    }

    if negative {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inr_formatting_uses_indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(450.0), "₹450");
        assert_eq!(format_inr(1234.0), "₹1,234");
        assert_eq!(format_inr(123456.0), "₹1,23,456");
        assert_eq!(format_inr(12345678.0), "₹1,23,45,678");
        assert_eq!(format_inr(-1234.4), "-₹1,234");
        // Rounds to zero: no stray minus sign.
        assert_eq!(format_inr(-0.4), "₹0");
        // Amounts past integer range still render full digit strings.
        assert_eq!(format_inr(1e15), "₹1,00,00,00,00,00,00,000");
    }

    #[test]
    fn request_yaml_parses() {
        let request: EstimationRequest = serde_yaml::from_str(
            r#"
product:
  name: Eco-friendly Water Bottle
  category: Kitchenware
materials:
  - name: Plastic
    quantity: 2
  - name: Bamboo
    quantity: 1
    cost_per_unit: 200
labor_cost: 500
profit_margin: 40
save:
  name: Bottle v1
"#,
        )
        .unwrap();
        assert_eq!(request.product.name, "Eco-friendly Water Bottle");
        assert_eq!(request.materials.len(), 2);
        assert_eq!(request.materials[1].cost_per_unit, Some(200.0));
        assert_eq!(request.labor_cost, 500.0);
        assert_eq!(request.other_costs, 0.0);
        assert_eq!(request.profit_margin, Some(40));
        assert_eq!(request.save.as_ref().unwrap().name, "Bottle v1");
    }
}
