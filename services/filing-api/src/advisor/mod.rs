//! Advisory text generation.
//!
//! Free-text elaboration for compliance plans and assistant answers can
//! delegate to an external text-generation service. The capability has
//! two variants selected at startup from configuration: a real
//! delegating client and a deterministic template renderer. When the
//! external variant fails or times out at runtime, output falls back to
//! the template renderer; the failure is logged and never surfaced to
//! the caller.

pub mod llm;
pub mod template;

pub use llm::LlmClient;
pub use template::TemplateAdvisor;

use gstflow_models::{AdvisorySource, BusinessAnalysis, CompliancePlan, RankedDocument};
use gstflow_utils::{AdvisorConfig, GstResult};

const ADVISOR_SYSTEM_PROMPT: &str = "You are a GST compliance advisor for small Indian \
    businesses. Answer concisely and factually, rely on the reference material provided \
    in the prompt, and never invent deadlines, rates, or scheme rules.";

/// The text-generation capability.
pub enum Advisor {
    /// Delegates to an external chat-completions API, with the template
    /// renderer standing by as the fallback.
    Llm {
        client: LlmClient,
        fallback: TemplateAdvisor,
    },
    /// Deterministic template rendering only.
    Template(TemplateAdvisor),
}

impl Advisor {
    /// Selects the variant: a configured, non-empty API key enables the
    /// delegating client, anything else selects templates.
    pub fn from_config(config: &AdvisorConfig) -> GstResult<Self> {
        match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(Self::Llm {
                client: LlmClient::new(config, key.to_string())?,
                fallback: TemplateAdvisor::new(),
            }),
            _ => Ok(Self::Template(TemplateAdvisor::new())),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Llm { .. } => "external",
            Self::Template(_) => "template",
        }
    }

    /// Renders the advisory elaboration for a compliance plan.
    pub async fn compliance_advisory(
        &self,
        analysis: &BusinessAnalysis,
        plan: &CompliancePlan,
        knowledge: &[RankedDocument],
    ) -> (String, AdvisorySource) {
        if let Self::Llm { client, .. } = self {
            let prompt = compliance_prompt(analysis, plan, knowledge);
            match client.complete(ADVISOR_SYSTEM_PROMPT, &prompt).await {
                Ok(text) => return (text, AdvisorySource::Generated),
                Err(e) => {
                    tracing::warn!(error = %e, "Advisory generation failed, falling back to template");
                }
            }
        }

        (
            self.template().compliance_advisory(analysis, plan),
            AdvisorySource::Template,
        )
    }

    /// Composes an assistant answer from the retrieved documents.
    pub async fn assistant_answer(
        &self,
        question: &str,
        knowledge: &[RankedDocument],
    ) -> (String, AdvisorySource) {
        if let Self::Llm { client, .. } = self {
            let prompt = assistant_prompt(question, knowledge);
            match client.complete(ADVISOR_SYSTEM_PROMPT, &prompt).await {
                Ok(text) => return (text, AdvisorySource::Generated),
                Err(e) => {
                    tracing::warn!(error = %e, "Answer generation failed, falling back to template");
                }
            }
        }

        (self.template().assistant_answer(knowledge), AdvisorySource::Template)
    }

    fn template(&self) -> &TemplateAdvisor {
        match self {
            Self::Llm { fallback, .. } => fallback,
            Self::Template(t) => t,
        }
    }
}

fn compliance_prompt(
    analysis: &BusinessAnalysis,
    plan: &CompliancePlan,
    knowledge: &[RankedDocument],
) -> String {
    let mut prompt = format!(
        "Write a short compliance advisory for a {} business with {} compliance risk. \
         Primary tax slab: {}%. Primary market: {}. Returns to file: {}.\n",
        analysis.business_size.as_str(),
        analysis.compliance_risk.as_str(),
        analysis.primary_slab,
        analysis.primary_state,
        plan.applicable_returns.join(", "),
    );

    for deadline in &plan.deadlines {
        prompt.push_str(&format!("{} due {}.\n", deadline.form, deadline.due_date));
    }
    if !plan.special_schemes.is_empty() {
        prompt.push_str(&format!("Eligible schemes: {}.\n", plan.special_schemes.join(", ")));
    }
    if !plan.risk_areas.is_empty() {
        prompt.push_str(&format!("Risk areas: {}.\n", plan.risk_areas.join(", ")));
    }

    if !knowledge.is_empty() {
        prompt.push_str("\nReference material:\n");
        for ranked in knowledge {
            prompt.push_str(&format!(
                "[{}] {}\n",
                ranked.document.id, ranked.document.content
            ));
        }
    }

    prompt
}

fn assistant_prompt(question: &str, knowledge: &[RankedDocument]) -> String {
    let mut prompt = format!("Question: {}\n", question);

    if knowledge.is_empty() {
        prompt.push_str(
            "No reference material matched this question; say so and suggest related GST topics.\n",
        );
    } else {
        prompt.push_str("\nReference material:\n");
        for ranked in knowledge {
            prompt.push_str(&format!(
                "[{}] {}\n",
                ranked.document.id, ranked.document.content
            ));
        }
    }

    prompt
}
