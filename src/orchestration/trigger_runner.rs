//! Trigger runner - main orchestrator for the dispatch pipeline
//!
//! Manages the complete trigger workflow:
//! - Access code verification (gates everything else)
//! - Optional log analysis with fallback content
//! - Argument escaping and invocation assembly
//! - External command dispatch and outcome reporting
//!
//! The invocation is only issued after verification succeeds and the
//! analysis step has resolved; exactly one subprocess is spawned per
//! successful authentication and none otherwise.

use crate::analysis::{fallback_analysis, ChatAnalyzer, LogAnalysis, LogAnalyzer, LogSource};
use crate::core::config::TriggerConfig;
use crate::core::error::TriggerError;
use crate::dispatch::{
    Dispatcher, InvocationSpec, ProcessOutcome, WorkflowCommand, WorkflowDispatcher,
};
use crate::orchestration::reporter::Reporter;
use crate::security::{AccessVerifier, SecretMasker};
use secrecy::{ExposeSecret, SecretString};
use std::time::Instant;

/// Report returned after a completed run
#[derive(Debug, Clone)]
pub struct TriggerReport {
    pub success: bool,
    pub exit_code: i32,
    pub outcome: ProcessOutcome,
    pub warnings: Vec<String>,
    pub duration_ms: u128,
}

/// Main trigger orchestrator
pub struct TriggerRunner {
    config: TriggerConfig,
    analyzer: Option<Box<dyn LogAnalyzer>>,
    dispatcher: Box<dyn Dispatcher>,
}

impl TriggerRunner {
    /// Assemble the production pipeline from resolved configuration
    ///
    /// The generative backend is selected only when its settings are fully
    /// configured; otherwise the run uses the fixed default content.
    pub fn from_config(config: TriggerConfig) -> Self {
        let analyzer: Option<Box<dyn LogAnalyzer>> = config
            .analyzer
            .clone()
            .map(|settings| Box::new(ChatAnalyzer::new(settings)) as Box<dyn LogAnalyzer>);

        let dispatcher = Box::new(WorkflowDispatcher::new(
            WorkflowCommand::gh_workflow_run(&config.workflow_file),
            config.deadline(),
        ));

        Self::new(config, analyzer, dispatcher)
    }

    /// Create a runner with explicit collaborators
    pub fn new(
        config: TriggerConfig,
        analyzer: Option<Box<dyn LogAnalyzer>>,
        dispatcher: Box<dyn Dispatcher>,
    ) -> Self {
        Self {
            config,
            analyzer,
            dispatcher,
        }
    }

    /// Run the pipeline once
    pub async fn run(&self, access_code: SecretString) -> Result<TriggerReport, TriggerError> {
        let started = Instant::now();
        let mut warnings = Vec::new();

        // 1. Verification gates everything; no subprocess on failure
        let verifier = AccessVerifier::new(self.config.access_code_hash.as_deref())?;
        if !verifier.verify(&access_code) {
            return Err(TriggerError::AuthenticationFailed);
        }
        println!("🔑 Access code verified");

        // 2. Analysis resolves to generated or fallback content
        let analysis = self.resolve_analysis(&mut warnings).await?;
        if !analysis.is_complete() {
            return Err(TriggerError::EmptyAnalysis);
        }

        // 3. Every free-text field is escaped independently
        let spec = InvocationSpec::build(
            access_code.expose_secret(),
            &analysis.title,
            &analysis.body,
        );

        // 4. One launch, one wait, one optional kill
        println!("🚀 Triggering workflow {}...", self.config.workflow_file);
        let outcome = self.dispatcher.dispatch(&spec).await?;

        // 5. Report with secrets redacted from echoed output
        let mut masker = SecretMasker::new();
        masker.add_secret(&access_code);
        if let Some(settings) = &self.config.analyzer {
            masker.add_secret(&settings.api_key);
        }
        let exit_code = Reporter::new(masker).report(&outcome);

        Ok(TriggerReport {
            success: outcome.is_success(),
            exit_code,
            outcome,
            warnings,
            duration_ms: started.elapsed().as_millis(),
        })
    }

    /// Resolve the title/body pair, degrading to the default content on any
    /// backend failure or incomplete result. Called at most once per run.
    async fn resolve_analysis(
        &self,
        warnings: &mut Vec<String>,
    ) -> Result<LogAnalysis, TriggerError> {
        let Some(analyzer) = &self.analyzer else {
            return Ok(fallback_analysis());
        };

        let payload = LogSource::from_config(self.config.log_file.clone())
            .load()
            .await?;

        println!("🧠 Generating log analysis ({} backend)...", analyzer.name());

        match analyzer.analyze(&payload).await {
            Ok(analysis) if analysis.is_complete() => Ok(analysis),
            Ok(_) => {
                let warning = TriggerError::AnalysisUnavailable {
                    message: "バックエンドの応答が不完全です".to_string(),
                };
                eprintln!("⚠️  {}", warning);
                warnings.push(warning.to_string());
                Ok(fallback_analysis())
            }
            Err(e) => {
                let warning = TriggerError::AnalysisUnavailable {
                    message: e.to_string(),
                };
                eprintln!("⚠️  {}", warning);
                warnings.push(warning.to_string());
                Ok(fallback_analysis())
            }
        }
    }
}
