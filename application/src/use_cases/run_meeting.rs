//! Run Meeting use case
//!
//! Drives a validated meeting through its turn sequence: each step appends a
//! directive, asks the speaking persona for a reply, and appends the reply.
//! The finished transcript is persisted once, after the last turn.

use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{MeetingProgress, NoProgress};
use crate::ports::transcript_store::{SaveTarget, SavedTranscript, StoreError, TranscriptStore};
use lab_domain::{
    DomainError, MeetingConfig, MeetingPlan, MeetingStep, Model, PricingTable, TokenUsage,
    Transcript,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while running a meeting
#[derive(Error, Debug)]
pub enum RunMeetingError {
    #[error("Invalid meeting configuration: {0}")]
    Config(#[from] DomainError),

    #[error("Model '{model}' cannot be used: {source}")]
    Preflight {
        model: Model,
        #[source]
        source: GatewayError,
    },

    #[error("Generation failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Failed to save transcript: {0}")]
    Store(#[from] StoreError),
}

/// Input for the RunMeeting use case
#[derive(Debug, Clone)]
pub struct RunMeetingInput {
    pub config: MeetingConfig,
    pub save: SaveTarget,
    /// Whether to hand back the final turn's text
    pub return_summary: bool,
}

impl RunMeetingInput {
    pub fn new(config: MeetingConfig, save: SaveTarget) -> Self {
        Self {
            config,
            save,
            return_summary: true,
        }
    }

    pub fn without_summary(mut self) -> Self {
        self.return_summary = false;
        self
    }
}

/// Result of a completed meeting
#[derive(Debug, Clone)]
pub struct RunMeetingOutput {
    pub transcript: Transcript,
    /// Text of the final turn, when requested
    pub summary: Option<String>,
    pub saved: SavedTranscript,
    /// Tokens consumed across every turn the backend reported
    pub usage: TokenUsage,
    pub model: Model,
    /// Estimated USD cost, when the model has a price
    pub cost: Option<f64>,
}

/// Use case for running a meeting
pub struct RunMeetingUseCase<G: CompletionGateway + 'static> {
    gateway: Arc<G>,
    store: Arc<dyn TranscriptStore>,
    logger: Arc<dyn ConversationLogger>,
    pricing: PricingTable,
}

impl<G: CompletionGateway + 'static> RunMeetingUseCase<G> {
    pub fn new(gateway: Arc<G>, store: Arc<dyn TranscriptStore>) -> Self {
        Self {
            gateway,
            store,
            logger: Arc::new(NoConversationLogger),
            pricing: PricingTable::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingTable) -> Self {
        self.pricing = pricing;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunMeetingInput,
    ) -> Result<RunMeetingOutput, RunMeetingError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunMeetingInput,
        progress: &dyn MeetingProgress,
    ) -> Result<RunMeetingOutput, RunMeetingError> {
        let config = &input.config;
        let sampling = config.sampling();
        let model = sampling.model.clone();

        // Everything that can be checked without a backend call happens
        // before the first turn so a bad setup leaves nothing behind.
        input.save.validate()?;
        self.gateway
            .preflight(&model)
            .map_err(|source| RunMeetingError::Preflight {
                model: model.clone(),
                source,
            })?;

        let plan = MeetingPlan::new(config);
        info!(
            meeting_type = %config.meeting_type(),
            model = %model,
            steps = plan.len(),
            "Starting meeting"
        );
        progress.on_meeting_start(config.meeting_type(), plan.len());
        self.logger.log(ConversationEvent::new(
            "meeting_started",
            json!({
                "meeting_type": config.meeting_type().as_str(),
                "model": model.as_str(),
                "temperature": sampling.temperature,
                "tools": sampling.offers_tools(),
                "speakers": config.speakers().iter().map(|p| p.title()).collect::<Vec<_>>(),
                "steps": plan.len(),
            }),
        ));

        let mut transcript = Transcript::new();
        let mut usage = TokenUsage::default();

        for step in plan {
            self.run_step(config, &step, &mut transcript, &mut usage, progress)
                .await?;
        }

        let saved = self.store.save(&input.save, &transcript)?;
        info!(
            turns = transcript.len(),
            path = %saved.structured.display(),
            "Transcript saved"
        );

        let cost = self.pricing.cost(model.as_str(), &usage);
        self.logger.log(ConversationEvent::new(
            "meeting_completed",
            json!({
                "turns": transcript.len(),
                "input_tokens": usage.input_tokens,
                "output_tokens": usage.output_tokens,
                "cost_usd": cost,
            }),
        ));
        progress.on_meeting_complete(transcript.len());

        let summary = input
            .return_summary
            .then(|| transcript.extract_summary().to_string());

        Ok(RunMeetingOutput {
            transcript,
            summary,
            saved,
            usage,
            model,
            cost,
        })
    }

    /// Append one directive, generate the reply, append it
    async fn run_step(
        &self,
        config: &MeetingConfig,
        step: &MeetingStep<'_>,
        transcript: &mut Transcript,
        usage: &mut TokenUsage,
        progress: &dyn MeetingProgress,
    ) -> Result<(), RunMeetingError> {
        let speaker = step.speaker;
        let sampling = config.sampling();

        transcript.push_directive(&step.directive);
        self.logger.log(ConversationEvent::new(
            "directive",
            json!({
                "phase": step.phase,
                "to": speaker.title(),
                "text": &step.directive,
            }),
        ));

        debug!(phase = %step.phase, speaker = %speaker, "Requesting reply");
        progress.on_turn_start(&step.phase, speaker);

        let request = CompletionRequest {
            system_instructions: speaker.instruction_text(),
            history: transcript.history_for(speaker),
            temperature: sampling.temperature,
            model: sampling.model.clone(),
            tools_enabled: sampling.offers_tools(),
        };

        let completion = match self.gateway.generate(request).await {
            Ok(completion) => completion,
            Err(e) => {
                warn!(phase = %step.phase, speaker = %speaker, "Generation failed: {}", e);
                progress.on_turn_failed(&step.phase, speaker, &e.to_string());
                return Err(e.into());
            }
        };

        if let Some(turn_usage) = completion.usage {
            *usage += turn_usage;
        }

        let turn = transcript.push_reply(speaker, &completion.text);
        self.logger.log(ConversationEvent::new(
            "reply",
            json!({
                "phase": step.phase,
                "speaker": speaker.title(),
                "text": turn.text(),
                "input_tokens": completion.usage.map(|u| u.input_tokens),
                "output_tokens": completion.usage.map(|u| u.output_tokens),
            }),
        ));

        progress.on_turn_complete(&step.phase, speaker);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion_gateway::Completion;
    use async_trait::async_trait;
    use lab_domain::{
        Agenda, ConversationRole, MeetingPhase, ModelPricing, Persona, Provider, SamplingParams,
    };
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Gateway that replays scripted replies and records every request
    struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<Completion, GatewayError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
        missing_credential: bool,
    }

    impl ScriptedGateway {
        fn new(replies: Vec<Result<Completion, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                requests: Mutex::new(Vec::new()),
                missing_credential: false,
            }
        }

        fn texts(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(Completion::text(*t))).collect())
        }

        /// Answers every request with "reply N"
        fn numbered(count: usize) -> Self {
            Self::new(
                (1..=count)
                    .map(|i| Ok(Completion::text(format!("reply {}", i))))
                    .collect(),
            )
        }

        fn without_credentials() -> Self {
            Self {
                missing_credential: true,
                ..Self::new(vec![])
            }
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionGateway for ScriptedGateway {
        async fn generate(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more replies".to_string())))
        }

        fn preflight(&self, model: &Model) -> Result<(), GatewayError> {
            if self.missing_credential {
                return Err(GatewayError::MissingCredential {
                    provider: model.provider(),
                    env_var: "OPENAI_API_KEY",
                });
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Vec<(SaveTarget, Transcript)>>,
    }

    impl TranscriptStore for MemoryStore {
        fn save(
            &self,
            target: &SaveTarget,
            transcript: &Transcript,
        ) -> Result<SavedTranscript, StoreError> {
            self.saved
                .lock()
                .unwrap()
                .push((target.clone(), transcript.clone()));
            Ok(SavedTranscript {
                structured: target.dir().join(format!("{}.json", target.name())),
                rendered: target.dir().join(format!("{}.md", target.name())),
            })
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        started: Mutex<Vec<(MeetingPhase, String)>>,
        failed: Mutex<usize>,
    }

    impl MeetingProgress for RecordingProgress {
        fn on_meeting_start(&self, _meeting_type: lab_domain::MeetingType, _total: usize) {}

        fn on_turn_start(&self, phase: &MeetingPhase, speaker: &Persona) {
            self.started
                .lock()
                .unwrap()
                .push((*phase, speaker.title().to_string()));
        }

        fn on_turn_complete(&self, _phase: &MeetingPhase, _speaker: &Persona) {}

        fn on_turn_failed(&self, _phase: &MeetingPhase, _speaker: &Persona, _error: &str) {
            *self.failed.lock().unwrap() += 1;
        }
    }

    // ==================== Helpers ====================

    fn persona(title: &str) -> Persona {
        Persona::new(title, "testing", "test things", "review")
    }

    fn team(participants: usize, rounds: u32) -> MeetingConfig {
        MeetingConfig::team(
            persona("Lead"),
            (1..=participants)
                .map(|i| persona(&format!("Member {}", i)))
                .collect(),
            rounds,
            Agenda::new("Discuss the plan").unwrap(),
        )
        .unwrap()
    }

    fn individual() -> MeetingConfig {
        MeetingConfig::individual(persona("Reviewer"), Agenda::new("Say hi").unwrap()).unwrap()
    }

    fn target() -> SaveTarget {
        SaveTarget::new(PathBuf::from("out"), "discussion")
    }

    fn use_case(gateway: ScriptedGateway) -> (RunMeetingUseCase<ScriptedGateway>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (RunMeetingUseCase::new(Arc::new(gateway), store.clone()), store)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_individual_meeting() {
        let (use_case, store) = use_case(ScriptedGateway::texts(&["Hello."]));

        let output = use_case
            .execute(RunMeetingInput::new(individual(), target()))
            .await
            .unwrap();

        let turns = output.transcript.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker().label(), "Orchestrator");
        assert!(
            turns[0]
                .text()
                .ends_with("Reviewer, please provide your response to the agenda.")
        );
        assert_eq!(turns[1].speaker().label(), "Reviewer");
        assert_eq!(turns[1].text(), "Hello.");
        assert_eq!(output.summary.as_deref(), Some("Hello."));

        let saved = store.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].1, output.transcript);
        assert_eq!(output.saved.structured, PathBuf::from("out/discussion.json"));
    }

    #[tokio::test]
    async fn test_team_turn_count() {
        for (participants, rounds) in [(1, 1), (2, 2), (3, 3)] {
            let steps = 1 + rounds as usize * (participants + 1);
            let (use_case, _) = use_case(ScriptedGateway::numbered(steps));

            let output = use_case
                .execute(RunMeetingInput::new(team(participants, rounds), target()))
                .await
                .unwrap();

            let expected = 2 + 2 * rounds as usize * participants + 2 * rounds as usize;
            assert_eq!(output.transcript.len(), expected);
            assert_eq!(output.summary.as_deref(), Some(format!("reply {}", steps).as_str()));
        }
    }

    #[tokio::test]
    async fn test_team_speaker_order() {
        let gateway = ScriptedGateway::numbered(7);
        let progress = RecordingProgress::default();
        let (use_case, _) = use_case(gateway);

        use_case
            .execute_with_progress(RunMeetingInput::new(team(2, 2), target()), &progress)
            .await
            .unwrap();

        let speakers: Vec<String> = progress
            .started
            .lock()
            .unwrap()
            .iter()
            .map(|(_, s)| s.clone())
            .collect();
        assert_eq!(
            speakers,
            vec!["Lead", "Member 1", "Member 2", "Lead", "Member 1", "Member 2", "Lead"]
        );

        let phases: Vec<MeetingPhase> = progress
            .started
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| *p)
            .collect();
        assert_eq!(phases[0], MeetingPhase::Opening);
        assert_eq!(phases[3], MeetingPhase::Synthesis { round: 1, rounds: 2 });
        assert_eq!(phases[6], MeetingPhase::FinalSummary);
    }

    #[tokio::test]
    async fn test_requests_use_speaker_perspective() {
        let gateway = Arc::new(ScriptedGateway::texts(&["opening", "member view", "summary"]));
        let store = Arc::new(MemoryStore::default());
        let use_case = RunMeetingUseCase::new(gateway.clone(), store);

        use_case
            .execute(RunMeetingInput::new(team(1, 1), target()))
            .await
            .unwrap();

        let requests = gateway.requests();
        assert_eq!(requests.len(), 3);

        // Opening: only the opening directive is visible
        assert_eq!(requests[0].history.len(), 1);
        assert_eq!(requests[0].history[0].role, ConversationRole::Requester);
        assert_eq!(requests[0].system_instructions, persona("Lead").instruction_text());

        // Member turn: lead's reply and the new directive collapse into one requester entry
        let member = &requests[1];
        assert_eq!(member.system_instructions, persona("Member 1").instruction_text());
        assert_eq!(member.history.len(), 1);
        assert!(member.history[0].text.contains("opening\n"));

        // Final summary: lead sees its own opening as generator
        let last = &requests[2];
        let roles: Vec<ConversationRole> = last.history.iter().map(|e| e.role).collect();
        assert_eq!(
            roles,
            vec![
                ConversationRole::Requester,
                ConversationRole::Generator,
                ConversationRole::Requester
            ]
        );
        assert!(last.history[2].text.contains("member view"));
    }

    #[tokio::test]
    async fn test_sampling_passed_through() {
        let gateway = Arc::new(ScriptedGateway::texts(&["ok"]));
        let use_case = RunMeetingUseCase::new(gateway.clone(), Arc::new(MemoryStore::default()));
        let config = individual().with_sampling(
            SamplingParams::default()
                .with_temperature(0.8)
                .with_model("deepseek-reasoner"),
        );

        use_case
            .execute(RunMeetingInput::new(config, target()))
            .await
            .unwrap();

        let request = &gateway.requests()[0];
        assert_eq!(request.temperature, 0.8);
        assert_eq!(request.model, Model::DeepSeekReasoner);
        assert!(!request.tools_enabled);
    }

    #[tokio::test]
    async fn test_without_summary() {
        let (use_case, _) = use_case(ScriptedGateway::texts(&["Hello."]));
        let output = use_case
            .execute(RunMeetingInput::new(individual(), target()).without_summary())
            .await
            .unwrap();
        assert_eq!(output.summary, None);
    }

    #[tokio::test]
    async fn test_gateway_error_propagates_without_saving() {
        let progress = RecordingProgress::default();
        let (use_case, store) = use_case(ScriptedGateway::new(vec![
            Ok(Completion::text("opening")),
            Err(GatewayError::RequestFailed("rate limited".to_string())),
        ]));

        let err = use_case
            .execute_with_progress(RunMeetingInput::new(team(2, 1), target()), &progress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunMeetingError::Gateway(GatewayError::RequestFailed(ref msg)) if msg == "rate limited"
        ));
        assert_eq!(*progress.failed.lock().unwrap(), 1);
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_preflight_failure_before_any_turn() {
        let gateway = Arc::new(ScriptedGateway::without_credentials());
        let store = Arc::new(MemoryStore::default());
        let use_case = RunMeetingUseCase::new(gateway.clone(), store.clone());

        let err = use_case
            .execute(RunMeetingInput::new(individual(), target()))
            .await
            .unwrap_err();

        match err {
            RunMeetingError::Preflight { model, source } => {
                assert_eq!(model.provider(), Provider::OpenAi);
                assert!(source.is_configuration());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(gateway.requests().is_empty());
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_save_name_rejected_before_any_turn() {
        let gateway = Arc::new(ScriptedGateway::texts(&["Hello."]));
        let use_case = RunMeetingUseCase::new(gateway.clone(), Arc::new(MemoryStore::default()));

        let err = use_case
            .execute(RunMeetingInput::new(
                individual(),
                SaveTarget::new("out", "../escape"),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, RunMeetingError::Store(StoreError::InvalidName(_))));
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn test_usage_and_cost_accumulate() {
        let gateway = ScriptedGateway::new(vec![
            Ok(Completion::text("a").with_usage(TokenUsage::new(1_000, 100))),
            Ok(Completion::text("b")),
            Ok(Completion::text("c").with_usage(TokenUsage::new(2_000, 400))),
        ]);
        let pricing = PricingTable::new().with_price(
            "gpt-3.5-turbo",
            ModelPricing {
                input_per_million: 1.0,
                output_per_million: 2.0,
            },
        );
        let logger = Arc::new(RecordingLogger::default());
        let (use_case, _) = use_case(gateway);
        let use_case = use_case.with_pricing(pricing).with_logger(logger.clone());

        let output = use_case
            .execute(RunMeetingInput::new(team(1, 1), target()))
            .await
            .unwrap();

        assert_eq!(output.usage, TokenUsage::new(3_000, 500));
        let cost = output.cost.unwrap();
        assert!((cost - 0.004).abs() < 1e-9);

        let events = logger.events.lock().unwrap();
        assert_eq!(events.first(), Some(&"meeting_started"));
        assert_eq!(events.last(), Some(&"meeting_completed"));
        assert_eq!(events.iter().filter(|e| **e == "reply").count(), 3);
        assert_eq!(events.iter().filter(|e| **e == "directive").count(), 3);
    }
}
