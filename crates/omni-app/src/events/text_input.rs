use anyhow::Context;
use omni_core::Language;
use omni_core::language::is_lookup_candidate;
use omni_core::preprocess::{DefaultPreprocessor, Preprocessor};
use omni_types::{AppEvent, TranslationResult};
use uuid::Uuid;

use crate::context::{AppContext, Services};

/// Handles one line of user input.
///
/// Empty input replays the last result's audio. Input seen before is shown again from
/// history. Anything else is translated and added to the history.
pub async fn handle_text_input(text: String, ctx: &AppContext) -> anyhow::Result<()> {
    let input = DefaultPreprocessor.process(&text);

    if input.is_empty() {
        let last = ctx.state.session.lock().await.last_result().cloned();
        match last {
            Some(last) => ctx.speak_async(&last.english_text),
            None => tracing::debug!("Empty input and nothing to replay"),
        }
        return Ok(());
    }

    let existing = {
        let mut session = ctx.state.session.lock().await;

        let found = match session.last_result() {
            Some(last) if last.input == input => Some(last.clone()),
            _ => session.find(&input).map(|(index, result)| {
                tracing::debug!("'{}' found in history at {}", input, index);
                result.clone()
            }),
        };

        if let Some(found) = &found {
            session.set_last_result(found.clone());
        }
        found
    };

    if let Some(existing) = existing {
        ctx.speak_async(&existing.english_text);
        ctx.event_tx.send(AppEvent::ShowResult(existing)).await?;
        return Ok(());
    }

    let (lookup_enabled, max_words) = {
        let config = ctx.state.config.read().await;
        (config.dictionary.enabled, config.dictionary.max_words)
    };

    match translate_input(&input, &ctx.services, lookup_enabled, max_words).await {
        Ok(result) => {
            let history = {
                let mut session = ctx.state.session.lock().await;
                session.add(result.clone());
                session.history().to_vec()
            };
            ctx.state.storage.save(&history).await;

            ctx.speak_async(&result.english_text);
            ctx.event_tx.send(AppEvent::ShowResult(result)).await?;
        }
        Err(e) => {
            tracing::error!("Translation failed for '{}': {:#}", input, e);
            ctx.event_tx
                .send(AppEvent::TranslationFailed {
                    input,
                    error: format!("{:#}", e),
                })
                .await?;
        }
    }

    Ok(())
}

/// Translates `input` and, for short English input, looks it up in the dictionary.
///
/// A dictionary failure only drops the dictionary section; a translation failure is an error.
pub async fn translate_input(
    input: &str,
    services: &Services,
    lookup_enabled: bool,
    max_words: usize,
) -> anyhow::Result<TranslationResult> {
    let translator = services
        .translator
        .as_ref()
        .context("No translator available")?;

    let mut language = Language::detect(input);
    if let Language::Other(_) = language {
        match translator.detect_language(input).await {
            Ok(code) => language = Language::from_code(&code),
            Err(e) => tracing::warn!("Language detection failed: {}", e),
        }
    }
    tracing::info!("Processing '{}' (detected {})", input, language);

    let pair = (
        language.translation_source().to_string(),
        language.translation_target().to_string(),
    );
    if !translator.supported_languages().contains(&pair) {
        anyhow::bail!(
            "{} cannot translate {} -> {}",
            translator.metadata().name,
            pair.0,
            pair.1
        );
    }

    let (source, target) = pair;
    let translate = translator.translate(input, source, target);

    let lookup = async {
        let dictionary = services.dictionary.as_ref()?;
        if !lookup_enabled || !is_lookup_candidate(input, &language, max_words) {
            return None;
        }

        match dictionary.lookup(input).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("{} lookup failed for '{}': {}", dictionary.name(), input, e);
                None
            }
        }
    };

    let (translation, dictionary) = tokio::join!(translate, lookup);
    let translation = translation.context("Translation failed")?;

    // The English side is what gets spoken
    let english_text = match language {
        Language::Chinese => translation.text.clone(),
        _ => input.to_string(),
    };

    Ok(TranslationResult {
        id: Uuid::new_v4(),
        input: input.to_string(),
        detected_lang: language,
        translation: translation.text,
        english_text,
        dictionary,
        timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
    })
}
