use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kanal::AsyncReceiver;
use omni_config::Config;
use omni_core::{DictionaryRecord, Language};
use omni_dictionary::{Dictionary, LookupError};
use omni_translator::{ProviderMetadata, TranslateError, Translation, Translator};
use omni_types::{AppEvent, TranslationResult, UiEvent};
use tempfile::TempDir;

use super::{entry, record};
use crate::context::{AppContext, Services};
use crate::events::handle_events;
use crate::events::text_input::handle_text_input;
use crate::process_once;
use crate::state::AppState;

const ROUTES: &[(&str, &str)] = &[("en", "zh-TW"), ("auto", "zh-TW"), ("auto", "en")];

/// Translator answering from a fixed reply, remembering every call
struct FakeTranslator {
    reply: Result<String, String>,
    pairs: Vec<(String, String)>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeTranslator {
    fn new(reply: Result<String, String>, pairs: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            reply,
            pairs: pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn replying(text: &str) -> Arc<Self> {
        Self::new(Ok(text.to_string()), ROUTES)
    }

    fn failing() -> Arc<Self> {
        Self::new(Err("quota".to_string()), ROUTES)
    }

    fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        from: String,
        to: String,
    ) -> Result<Translation, TranslateError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), from.clone(), to.clone()));

        match &self.reply {
            Ok(reply) => Ok(Translation {
                text: reply.clone(),
                from,
                to,
                provider: "fake".to_string(),
            }),
            Err(e) => Err(TranslateError::ApiError(e.clone())),
        }
    }

    async fn detect_language(&self, _text: &str) -> Result<String, TranslateError> {
        Ok("fr".to_string())
    }

    fn supported_languages(&self) -> Vec<(String, String)> {
        self.pairs.clone()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

struct FakeDictionary {
    record: Option<DictionaryRecord>,
    fail: bool,
    lookups: AtomicUsize,
}

impl FakeDictionary {
    fn with(record: Option<DictionaryRecord>) -> Arc<Self> {
        Arc::new(Self {
            record,
            fail: false,
            lookups: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            record: None,
            fail: true,
            lookups: AtomicUsize::new(0),
        })
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Dictionary for FakeDictionary {
    fn name(&self) -> &str {
        "fake dictionary"
    }

    async fn lookup(&self, term: &str) -> Result<Option<DictionaryRecord>, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(LookupError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }

        Ok(self.record.clone().map(|mut record| {
            record.term = term.to_string();
            record
        }))
    }
}

struct Harness {
    ctx: AppContext,
    rx: AsyncReceiver<AppEvent>,
    _dir: TempDir,
}

impl Harness {
    fn new(translator: Option<Arc<FakeTranslator>>, dictionary: Option<Arc<FakeDictionary>>) -> Self {
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.history.path = dir.path().join("history.json").display().to_string();

        let services = Services {
            translator: translator.map(|t| t as Arc<dyn Translator>),
            dictionary: dictionary.map(|d| d as Arc<dyn Dictionary>),
            speaker: None,
        };

        let (tx, rx) = kanal::unbounded_async();
        let ctx = AppContext::new(Arc::new(AppState::new(config)), tx, services);

        Self { ctx, rx, _dir: dir }
    }

    /// Like `new`, with `history` already on disk before the state loads it
    async fn with_history(
        translator: Option<Arc<FakeTranslator>>,
        history: &[TranslationResult],
    ) -> Self {
        let harness = Self::new(translator.clone(), None);
        harness.ctx.state.storage.try_save(history).await.unwrap();

        let mut config = Config::default();
        config.history.path = harness.ctx.state.storage.path().display().to_string();
        let services = Services {
            translator: translator.map(|t| t as Arc<dyn Translator>),
            ..Services::default()
        };

        let (tx, rx) = kanal::unbounded_async();
        let ctx = AppContext::new(Arc::new(AppState::new(config)), tx, services);

        Self {
            ctx,
            rx,
            _dir: harness._dir,
        }
    }

    async fn input(&self, text: &str) {
        handle_text_input(text.to_string(), &self.ctx).await.unwrap();
    }

    fn next_event(&self) -> Option<AppEvent> {
        self.rx.try_recv().unwrap()
    }

    async fn history_len(&self) -> usize {
        self.ctx.state.session.lock().await.history().len()
    }
}

#[tokio::test]
async fn test_english_word_is_translated_and_looked_up() {
    let translator = FakeTranslator::replying("例外");
    let dictionary = FakeDictionary::with(Some(record("", "someone or something that is not included")));
    let harness = Harness::new(Some(translator.clone()), Some(dictionary.clone()));

    harness.input("exception").await;

    assert_eq!(
        translator.calls(),
        vec![("exception".to_string(), "en".to_string(), "zh-TW".to_string())]
    );
    assert_eq!(dictionary.lookups(), 1);

    match harness.next_event() {
        Some(AppEvent::ShowResult(result)) => {
            assert_eq!(result.translation, "例外");
            assert_eq!(result.english_text, "exception");
            assert_eq!(result.detected_lang, Language::English);
            assert_eq!(result.dictionary.unwrap().term, "exception");
        }
        other => panic!("unexpected event: {:?}", other),
    }

    // Persisted straight away, with the session released
    assert!(harness.ctx.state.session.try_lock().is_ok());
    let saved = harness.ctx.state.storage.try_load().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].input, "exception");
}

#[tokio::test]
async fn test_chinese_input_goes_to_english() {
    let translator = FakeTranslator::replying("exception");
    let dictionary = FakeDictionary::with(Some(record("", "unused")));
    let harness = Harness::new(Some(translator.clone()), Some(dictionary.clone()));

    harness.input("例外").await;

    assert_eq!(translator.calls()[0].2, "en");
    assert_eq!(dictionary.lookups(), 0);

    match harness.next_event() {
        Some(AppEvent::ShowResult(result)) => {
            assert_eq!(result.english_text, "exception");
            assert_eq!(result.detected_lang, Language::Chinese);
            assert!(result.dictionary.is_none());
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_long_english_input_skips_dictionary() {
    let dictionary = FakeDictionary::with(Some(record("", "unused")));
    let harness = Harness::new(
        Some(FakeTranslator::replying("這是一個句子")),
        Some(dictionary.clone()),
    );

    harness.input("this is a sentence").await;
    harness.input("give up").await;

    assert_eq!(dictionary.lookups(), 1);
}

#[tokio::test]
async fn test_unknown_script_asks_the_translator() {
    let translator = FakeTranslator::replying("?");
    let harness = Harness::new(Some(translator.clone()), None);

    harness.input("1234").await;

    assert_eq!(translator.calls()[0].1, "auto");
    match harness.next_event() {
        Some(AppEvent::ShowResult(result)) => {
            assert_eq!(result.detected_lang, Language::Other("fr".into()))
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_dictionary_failure_keeps_translation() {
    let harness = Harness::new(
        Some(FakeTranslator::replying("例外")),
        Some(FakeDictionary::failing()),
    );

    harness.input("exception").await;

    match harness.next_event() {
        Some(AppEvent::ShowResult(result)) => {
            assert_eq!(result.translation, "例外");
            assert!(result.dictionary.is_none());
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_translation_failure_is_reported() {
    let harness = Harness::new(Some(FakeTranslator::failing()), None);

    harness.input("exception").await;

    match harness.next_event() {
        Some(AppEvent::TranslationFailed { input, error }) => {
            assert_eq!(input, "exception");
            assert!(error.contains("quota"));
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(harness.history_len().await, 0);
}

#[tokio::test]
async fn test_missing_translator_is_reported() {
    let harness = Harness::new(None, None);

    harness.input("exception").await;

    assert!(matches!(
        harness.next_event(),
        Some(AppEvent::TranslationFailed { .. })
    ));
}

#[tokio::test]
async fn test_uppercase_input_is_lowercased() {
    let harness = Harness::new(Some(FakeTranslator::replying("例外")), None);

    harness.input("  Exception ").await;

    match harness.next_event() {
        Some(AppEvent::ShowResult(result)) => assert_eq!(result.input, "exception"),
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_input_replays_without_translating() {
    let translator = FakeTranslator::replying("例外");
    let harness = Harness::new(Some(translator.clone()), None);

    harness.input("exception").await;
    harness.next_event();

    // Same as the last input: shown again, not translated
    harness.input("exception").await;
    match harness.next_event() {
        Some(AppEvent::ShowResult(result)) => assert_eq!(result.translation, "例外"),
        other => panic!("unexpected event: {:?}", other),
    }

    // Empty input only replays the audio
    harness.input("").await;
    assert!(harness.next_event().is_none());

    assert_eq!(translator.calls().len(), 1);
    assert_eq!(harness.history_len().await, 1);
}

#[tokio::test]
async fn test_one_shot_repeat_of_last_saved_entry() {
    let translator = FakeTranslator::replying("unused");
    let harness = Harness::with_history(
        Some(translator.clone()),
        &[entry("hello", "你好"), entry("exception", "例外")],
    )
    .await;

    let shown = process_once(&harness.ctx, &harness.rx, "exception".into())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(shown.translation, "例外");
    assert!(translator.calls().is_empty());
}

#[tokio::test]
async fn test_one_shot_reports_failure() {
    let harness = Harness::new(Some(FakeTranslator::failing()), None);

    let result = process_once(&harness.ctx, &harness.rx, "exception".into()).await;

    assert!(result.unwrap_err().to_string().contains("quota"));
}

#[tokio::test]
async fn test_unsupported_route_is_not_translated() {
    let translator = FakeTranslator::new(Ok("例外".to_string()), &[("auto", "en")]);
    let harness = Harness::new(Some(translator.clone()), None);

    harness.input("exception").await;

    assert!(translator.calls().is_empty());
    match harness.next_event() {
        Some(AppEvent::TranslationFailed { error, .. }) => {
            assert!(error.contains("fake cannot translate en -> zh-TW"))
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_input_from_history_is_redisplayed() {
    let translator = FakeTranslator::replying("世界");
    let harness = Harness::new(Some(translator.clone()), None);
    {
        let mut session = harness.ctx.state.session.lock().await;
        session.add(entry("hello", "你好"));
        session.add(entry("world", "世界"));
    }

    harness.input("HELLO").await;

    assert!(translator.calls().is_empty());
    match harness.next_event() {
        Some(AppEvent::ShowResult(result)) => assert_eq!(result.translation, "你好"),
        other => panic!("unexpected event: {:?}", other),
    }

    let session = harness.ctx.state.session.lock().await;
    assert_eq!(session.last_result().unwrap().input, "hello");
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn test_history_commands() {
    let harness = Harness::new(None, None);
    {
        let mut session = harness.ctx.state.session.lock().await;
        session.add(entry("hello", "你好"));
        session.add(entry("help", "幫助"));
        session.add(entry("world", "世界"));
    }
    let timeout = Duration::from_secs(5);

    handle_events(
        &harness.ctx,
        AppEvent::UiEvent(UiEvent::SearchHistory("hel".into())),
        timeout,
    )
    .await
    .unwrap();
    match harness.next_event() {
        Some(AppEvent::ShowHistory(items)) => assert_eq!(items.len(), 2),
        other => panic!("unexpected event: {:?}", other),
    }

    handle_events(
        &harness.ctx,
        AppEvent::UiEvent(UiEvent::SelectHistory(1)),
        timeout,
    )
    .await
    .unwrap();
    match harness.next_event() {
        Some(AppEvent::ShowResult(result)) => assert_eq!(result.input, "help"),
        other => panic!("unexpected event: {:?}", other),
    }

    handle_events(
        &harness.ctx,
        AppEvent::UiEvent(UiEvent::DeleteHistory(0)),
        timeout,
    )
    .await
    .unwrap();
    assert!(matches!(harness.next_event(), Some(AppEvent::Status(_))));

    let saved: Vec<_> = harness
        .ctx
        .state
        .storage
        .try_load()
        .unwrap()
        .into_iter()
        .map(|r| r.input)
        .collect();
    assert_eq!(saved, vec!["help", "world"]);

    handle_events(
        &harness.ctx,
        AppEvent::UiEvent(UiEvent::DeleteHistory(9)),
        timeout,
    )
    .await
    .unwrap();
    match harness.next_event() {
        Some(AppEvent::Status(status)) => assert_eq!(status, "No history entry 9"),
        other => panic!("unexpected event: {:?}", other),
    }
}
