//! Template Advisor
//!
//! Handlebars-based deterministic rendering of advisory text. This is
//! the mandatory fallback for the external text-generation service and
//! works with no collaborator present.

use handlebars::Handlebars;
use serde_json::json;

use gstflow_models::{BusinessAnalysis, CompliancePlan, RankedDocument};

const COMPLIANCE_ADVISORY_TEMPLATE: &str = "\
Your business profile for this period: {{business_size}} enterprise with {{risk}} \
compliance risk (score {{risk_score}} of 3). Sales are concentrated in the \
{{primary_slab}}% slab with {{primary_state}} as the leading market; the average \
transaction value is {{average_transaction}}.

File GSTR-1 by {{gstr1_due}}. File GSTR-3B and pay the tax due by {{gstr3b_due}}.
{{#if special_schemes}}
Scheme eligibility: {{#each special_schemes}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}. \
The Composition Scheme offers a flat concessional rate and quarterly filing while \
turnover stays within the ceiling.
{{/if}}
{{#if risk_areas}}
Watch areas: {{#each risk_areas}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}. Keep \
interstate invoices reconciled and review slab classifications before filing.
{{/if}}";

const ASSISTANT_ANSWER_TEMPLATE: &str = "\
{{#if has_sources}}From the GST knowledge base ({{primary_source}}):

{{primary_content}}
{{#if related}}
Related reading: {{#each related}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}.
{{/if}}{{else}}No matching guidance was found in the GST knowledge base for this \
question. Try asking about registration, rate slabs, return deadlines, input tax \
credit, or the composition scheme.{{/if}}";

/// Deterministic advisory renderer.
pub struct TemplateAdvisor {
    handlebars: Handlebars<'static>,
}

impl TemplateAdvisor {
    pub fn new() -> Self {
        Self {
            handlebars: Handlebars::new(),
        }
    }

    /// Renders the compliance advisory from the computed fields.
    pub fn compliance_advisory(&self, analysis: &BusinessAnalysis, plan: &CompliancePlan) -> String {
        let format_due = |form: &str, fallback: &str| {
            plan.due_date_for(form)
                .map(|d| d.format("%d %B %Y").to_string())
                .unwrap_or_else(|| fallback.to_string())
        };

        let data = json!({
            "business_size": analysis.business_size.as_str(),
            "risk": analysis.compliance_risk.as_str(),
            "risk_score": analysis.risk_score,
            "primary_slab": analysis.primary_slab,
            "primary_state": analysis.primary_state,
            "average_transaction": format!("{:.2}", analysis.average_transaction),
            "gstr1_due": format_due("GSTR-1", "the 10th of next month"),
            "gstr3b_due": format_due("GSTR-3B", "the 20th of next month"),
            "special_schemes": plan.special_schemes,
            "risk_areas": plan.risk_areas,
        });

        match self
            .handlebars
            .render_template(COMPLIANCE_ADVISORY_TEMPLATE, &data)
        {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Advisory template rendering failed");
                format!(
                    "File GSTR-1 by the 10th and GSTR-3B with payment by the 20th of next \
                     month. Business size: {}. Compliance risk: {}.",
                    analysis.business_size.as_str(),
                    analysis.compliance_risk.as_str(),
                )
            }
        }
    }

    /// Renders an assistant answer that cites the top retrieved document.
    pub fn assistant_answer(&self, knowledge: &[RankedDocument]) -> String {
        let data = json!({
            "has_sources": !knowledge.is_empty(),
            "primary_source": knowledge.first().map(|r| r.document.id.clone()),
            "primary_content": knowledge.first().map(|r| r.document.content.clone()),
            "related": knowledge.iter().skip(1).map(|r| r.document.id.clone()).collect::<Vec<_>>(),
        });

        match self
            .handlebars
            .render_template(ASSISTANT_ANSWER_TEMPLATE, &data)
        {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Answer template rendering failed");
                knowledge
                    .first()
                    .map(|r| r.document.content.clone())
                    .unwrap_or_else(|| {
                        "No matching guidance was found in the GST knowledge base.".to_string()
                    })
            }
        }
    }
}

impl Default for TemplateAdvisor {
    fn default() -> Self {
        Self::new()
    }
}
