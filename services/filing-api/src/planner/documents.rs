//! Filing Document Renderer
//!
//! Handlebars-based rendering of the plain-text return summaries
//! attached to each filing.

use std::collections::BTreeMap;

use handlebars::Handlebars;
use serde_json::json;

use gstflow_models::{CompliancePlan, GeneratedDocument, TaxCalculation};
use gstflow_utils::{GstError, GstResult};

const GSTR1_SUMMARY_TEMPLATE: &str = "\
GSTR-1 SUMMARY OF OUTWARD SUPPLIES
Source file: {{filename}}
Due date: {{due_date}}

Total outward supplies: {{total_sales}}

By tax slab:
{{#each slabs}}  {{@key}}%: {{this}}
{{/each}}
By place of supply:
{{#each states}}  {{@key}}: {{this}}
{{/each}}";

const GSTR3B_SUMMARY_TEMPLATE: &str = "\
GSTR-3B SUMMARY RETURN
Source file: {{filename}}
Due date: {{due_date}}

Total taxable value: {{total_sales}}
CGST: {{cgst}}
SGST: {{sgst}}
IGST: {{igst}}
Total tax payable: {{total_tax}}

Pay the net liability along with this return.
";

/// Renders the generated documents for a filing.
pub struct DocumentRenderer {
    handlebars: Handlebars<'static>,
}

impl DocumentRenderer {
    pub fn new() -> Self {
        Self {
            handlebars: Handlebars::new(),
        }
    }

    /// Renders every return summary. A template failure drops that one
    /// document with an error log instead of failing the filing.
    pub fn render_all(
        &self,
        filename: &str,
        calc: &TaxCalculation,
        plan: &CompliancePlan,
    ) -> Vec<GeneratedDocument> {
        let mut documents = Vec::new();

        match self.render_gstr1(filename, calc, plan) {
            Ok(content) => documents.push(GeneratedDocument::new("GSTR-1 Summary", content)),
            Err(e) => tracing::error!(error = %e, "Failed to render GSTR-1 summary"),
        }

        match self.render_gstr3b(filename, calc, plan) {
            Ok(content) => documents.push(GeneratedDocument::new("GSTR-3B Summary", content)),
            Err(e) => tracing::error!(error = %e, "Failed to render GSTR-3B summary"),
        }

        documents
    }

    fn render_gstr1(
        &self,
        filename: &str,
        calc: &TaxCalculation,
        plan: &CompliancePlan,
    ) -> GstResult<String> {
        let data = json!({
            "filename": filename,
            "due_date": due_date_text(plan, "GSTR-1"),
            "total_sales": format!("{:.2}", calc.total_sales),
            "slabs": format_amounts(&calc.sales_by_slab),
            "states": format_amounts(&calc.sales_by_state),
        });

        self.handlebars
            .render_template(GSTR1_SUMMARY_TEMPLATE, &data)
            .map_err(|e| GstError::internal(e.to_string()))
    }

    fn render_gstr3b(
        &self,
        filename: &str,
        calc: &TaxCalculation,
        plan: &CompliancePlan,
    ) -> GstResult<String> {
        let data = json!({
            "filename": filename,
            "due_date": due_date_text(plan, "GSTR-3B"),
            "total_sales": format!("{:.2}", calc.total_sales),
            "cgst": format!("{:.2}", calc.cgst),
            "sgst": format!("{:.2}", calc.sgst),
            "igst": format!("{:.2}", calc.igst),
            "total_tax": format!("{:.2}", calc.total_tax),
        });

        self.handlebars
            .render_template(GSTR3B_SUMMARY_TEMPLATE, &data)
            .map_err(|e| GstError::internal(e.to_string()))
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn due_date_text(plan: &CompliancePlan, form: &str) -> String {
    plan.due_date_for(form)
        .map(|d| d.format("%d %B %Y").to_string())
        .unwrap_or_else(|| "pending".to_string())
}

fn format_amounts(map: &BTreeMap<String, f64>) -> BTreeMap<String, String> {
    map.iter()
        .map(|(key, value)| (key.clone(), format!("{:.2}", value)))
        .collect()
}
