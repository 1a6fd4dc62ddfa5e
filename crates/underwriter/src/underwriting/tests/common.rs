use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::underwriting::domain::{ApplicantId, Application};
use crate::underwriting::resolver::{PolicyResolver, PolicyStructurer, StructurerError};
use crate::underwriting::UnderwritingAgent;

/// Baseline applicant from the approved end-to-end example.
pub(super) fn application() -> Application {
    Application {
        applicant_id: ApplicantId("APP-1001".to_string()),
        requested_amount: 250_000.0,
        annual_income: 80_000.0,
        monthly_debt: 1_000.0,
        credit_score: 750,
        employment_months: 24,
        is_first_time_buyer: false,
        is_self_employed: false,
    }
}

pub(super) fn application_with(adjust: impl FnOnce(&mut Application)) -> Application {
    let mut application = application();
    adjust(&mut application);
    application
}

/// Structurer replaying scripted responses and recording prompts.
pub(super) struct ScriptedStructurer {
    responses: Mutex<Vec<Result<String, StructurerError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedStructurer {
    pub(super) fn new(responses: Vec<Result<String, StructurerError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub(super) fn failing(error: StructurerError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

impl PolicyStructurer for ScriptedStructurer {
    fn structure(&self, prompt: &str) -> Result<String, StructurerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.to_string());
        let mut responses = self.responses.lock().expect("response mutex poisoned");
        if responses.is_empty() {
            return Err(StructurerError::Transport("no scripted response".to_string()));
        }
        responses.remove(0)
    }
}

pub(super) fn resolver(structurer: ScriptedStructurer) -> PolicyResolver<ScriptedStructurer> {
    PolicyResolver::new(structurer)
}

pub(super) fn agent(structurer: ScriptedStructurer) -> UnderwritingAgent<ScriptedStructurer> {
    UnderwritingAgent::new(resolver(structurer))
}

pub(super) const STRUCTURED_POLICY: &str = r#"{
  "tiers": {
    "low":    {"dti_limit": 43, "employment_months": 6, "income_override": null},
    "medium": {"dti_limit": 36, "employment_months": 12, "income_override": null},
    "high":   {"dti_limit": 28, "employment_months": 30, "income_override": 120000}
  },
  "income_min": 40000,
  "auto_deny_credit": 580,
  "auto_deny_dti_excess": 7,
  "first_time_buyer_leniency": 3.5,
  "self_employed_months": 36
}"#;
