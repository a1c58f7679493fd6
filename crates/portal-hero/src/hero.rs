//! Hero presentation: one language rotator driving a scene of word cyclers.
//!
//! The rotator is the coordinating clock. A coordinator task watches it and,
//! on every flip, re-seeds each cycler with the new language's list, which
//! restarts the cycler at index 0. Cycler timers are independent of the
//! rotator's timer, so a language change and the first phrase of the new
//! language appear together only up to task scheduling; the design does not
//! promise more than that.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::HeroConfig;
use crate::cycler::{CyclerConfig, WordCycler};
use crate::language::Language;
use crate::phrase::{PhraseList, StatPair, TranslationBundle};
use crate::rotator::LanguageRotator;
use crate::store::BundleStore;

/// What the hero shows at one instant. `None` fields render nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroFrame {
    pub language: Language,
    pub language_name: &'static str,
    pub headline: Option<String>,
    pub made_simple: Option<String>,
    pub subtitle: Option<String>,
    pub cta: Option<String>,
    pub stats: Vec<StatPair>,
}

struct Scene {
    language: Language,
    config: CyclerConfig,
    headline: WordCycler,
    subtitle: WordCycler,
    made_simple: WordCycler,
    cta: WordCycler,
    stats: Vec<WordCycler<StatPair>>,
}

fn phrases(
    bundle: Option<&TranslationBundle>,
    field: fn(&TranslationBundle) -> &PhraseList,
) -> Arc<[String]> {
    bundle.map_or_else(|| Arc::from(Vec::new()), |b| field(b).shared())
}

impl Scene {
    fn new(language: Language, bundle: Option<&TranslationBundle>, config: CyclerConfig) -> Self {
        let stats = bundle
            .map(|b| b.stats().iter().map(|s| WordCycler::spawn(s.pairs(), config)).collect())
            .unwrap_or_default();
        Self {
            language,
            config,
            headline: WordCycler::spawn(phrases(bundle, TranslationBundle::headline), config),
            subtitle: WordCycler::spawn(phrases(bundle, TranslationBundle::subtitle), config),
            made_simple: WordCycler::spawn(phrases(bundle, TranslationBundle::made_simple), config),
            cta: WordCycler::spawn(phrases(bundle, TranslationBundle::cta), config),
            stats,
        }
    }

    fn text_cyclers(&self) -> [&WordCycler; 4] {
        [&self.headline, &self.subtitle, &self.made_simple, &self.cta]
    }

    fn reseed(&mut self, language: Language, bundle: Option<&TranslationBundle>) {
        self.language = language;

        // Every flip starts each list over, even one the languages share.
        self.headline.reseed(phrases(bundle, TranslationBundle::headline));
        self.subtitle.reseed(phrases(bundle, TranslationBundle::subtitle));
        self.made_simple.reseed(phrases(bundle, TranslationBundle::made_simple));
        self.cta.reseed(phrases(bundle, TranslationBundle::cta));

        let stats = bundle.map_or(&[][..], TranslationBundle::stats);
        // Dropped cyclers cancel their own timers.
        self.stats.truncate(stats.len());
        for (i, stat) in stats.iter().enumerate() {
            match self.stats.get(i) {
                Some(cycler) => cycler.reseed(stat.pairs()),
                None => self.stats.push(WordCycler::spawn(stat.pairs(), self.config)),
            }
        }

        debug!(
            language = language.key(),
            stats = self.stats.len(),
            "hero scene re-seeded"
        );
    }

    fn frame(&self) -> HeroFrame {
        HeroFrame {
            language: self.language,
            language_name: self.language.native_name(),
            headline: self.headline.current(),
            made_simple: self.made_simple.current(),
            subtitle: self.subtitle.current(),
            cta: self.cta.current(),
            stats: self.stats.iter().filter_map(WordCycler::current).collect(),
        }
    }

    fn acknowledge_exits(&self) {
        for cycler in self.text_cyclers() {
            cycler.acknowledge_exit();
        }
        for cycler in &self.stats {
            cycler.acknowledge_exit();
        }
    }

    async fn shutdown(self) {
        self.headline.shutdown().await;
        self.subtitle.shutdown().await;
        self.made_simple.shutdown().await;
        self.cta.shutdown().await;
        for cycler in self.stats {
            cycler.shutdown().await;
        }
    }
}

/// Coordinator task handle; aborts the task when dropped.
struct Coordinator(Option<JoinHandle<()>>);

impl Coordinator {
    async fn cancel(mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
        }
    }
}

/// The running hero: a language rotator plus the word cyclers it drives.
///
/// Dropping the presentation cancels every timer it owns.
pub struct HeroPresentation {
    rotator: LanguageRotator,
    scene: Arc<Mutex<Scene>>,
    coordinator: Coordinator,
}

impl HeroPresentation {
    /// Start rotating all supported languages with the given timing.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(store: Arc<BundleStore>, config: &HeroConfig) -> Self {
        let rotator = LanguageRotator::spawn(config.language_period);
        Self::with_rotator(store, rotator, config.cycler())
    }

    /// Drive a scene from an existing rotator.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn with_rotator(store: Arc<BundleStore>, rotator: LanguageRotator, cycler: CyclerConfig) -> Self {
        let mut languages = rotator.subscribe();
        let language = *languages.borrow_and_update();
        let bundle = store.get(language);
        if bundle.is_none() {
            warn!(language = language.key(), "no translations for language, hero renders nothing");
        }
        let scene = Arc::new(Mutex::new(Scene::new(language, bundle, cycler)));

        let handle = {
            let scene = Arc::clone(&scene);
            tokio::spawn(async move {
                while languages.changed().await.is_ok() {
                    let language = *languages.borrow_and_update();
                    let bundle = store.get(language);
                    if bundle.is_none() {
                        warn!(language = language.key(), "no translations for language, hero renders nothing");
                    }
                    scene.lock().await.reseed(language, bundle);
                }
                debug!("hero coordinator exited");
            })
        };

        info!(language = language.key(), "hero presentation started");

        Self {
            rotator,
            scene,
            coordinator: Coordinator(Some(handle)),
        }
    }

    /// The rotator's active language.
    pub fn language(&self) -> Language {
        self.rotator.current()
    }

    /// Watch the active language.
    pub fn subscribe_language(&self) -> watch::Receiver<Language> {
        self.rotator.subscribe()
    }

    /// Snapshot of everything the hero currently shows.
    pub async fn frame(&self) -> HeroFrame {
        self.scene.lock().await.frame()
    }

    /// Report that the presenter finished every in-flight exit transition.
    pub async fn acknowledge_exits(&self) {
        self.scene.lock().await.acknowledge_exits();
    }

    /// Stop the coordinator, the rotator and every cycler, waiting for all of
    /// them to exit.
    pub async fn shutdown(self) {
        let Self {
            rotator,
            scene,
            coordinator,
        } = self;

        coordinator.cancel().await;
        rotator.shutdown().await;
        if let Ok(scene) = Arc::try_unwrap(scene) {
            scene.into_inner().shutdown().await;
        }
        info!("hero presentation stopped");
    }
}

impl std::fmt::Debug for HeroPresentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroPresentation")
            .field("rotator", &self.rotator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::time::{self, Instant};

    use crate::cycler::TransitionMode;
    use crate::phrase::StatEntry;

    const WORD: Duration = Duration::from_millis(2000);
    const LANGUAGE: Duration = Duration::from_millis(2500);

    fn config() -> HeroConfig {
        HeroConfig {
            word_period: WORD,
            language_period: LANGUAGE,
            transition: TransitionMode::Instant,
            translations_path: None,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn bundle(headline: &[&str], stats: &[(&[&str], &[&str])]) -> TranslationBundle {
        let list = |items: &[&str]| PhraseList::new(items.iter().map(|s| (*s).to_owned()).collect()).unwrap();
        TranslationBundle::new(
            list(headline),
            list(&["sub"]),
            list(&["simple"]),
            stats
                .iter()
                .map(|(n, l)| StatEntry::new(list(n), list(l)).unwrap())
                .collect(),
            list(&["go"]),
        )
        .unwrap()
    }

    /// Assert every stat pair's number and label sit at the same index.
    fn assert_lock_step(store: &BundleStore, frame: &HeroFrame) {
        let bundle = store.get(frame.language).unwrap();
        for (pair, entry) in frame.stats.iter().zip(bundle.stats()) {
            let n = entry.number().iter().position(|x| *x == pair.number).unwrap();
            let l = entry.label().iter().position(|x| *x == pair.label).unwrap();
            assert_eq!(n, l, "stat out of lock-step: {pair:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn english_first_then_words_advance() {
        let start = Instant::now();
        let store = Arc::new(BundleStore::builtin());
        let hero = HeroPresentation::spawn(Arc::clone(&store), &config());

        time::sleep_until(start + ms(100)).await;
        let frame = hero.frame().await;
        assert_eq!(frame.language, Language::English);
        assert_eq!(frame.language_name, "English");
        assert_eq!(frame.headline.as_deref(), Some("DPR ASSESSMENT IN"));
        assert_eq!(frame.cta.as_deref(), Some("Start Assessment"));
        assert_eq!(frame.stats.len(), 3);
        assert_eq!(frame.stats[0].number, "120+");
        assert_lock_step(&store, &frame);

        time::sleep_until(start + ms(2100)).await;
        let frame = hero.frame().await;
        assert_eq!(frame.headline.as_deref(), Some("PROJECT ANALYSIS IN"));
        assert_eq!(frame.made_simple.as_deref(), Some("SIMPLIFIED FOR YOU"));
        assert_eq!(frame.stats[0].label, "Projects Reviewed");
        assert_lock_step(&store, &frame);
    }

    #[tokio::test(start_paused = true)]
    async fn language_flip_reseeds_every_cycler_at_index_zero() {
        let start = Instant::now();
        let store = Arc::new(BundleStore::builtin());
        let hero = HeroPresentation::spawn(Arc::clone(&store), &config());

        // English cyclers are at index 1 just before the flip at 2500ms.
        time::sleep_until(start + ms(2400)).await;
        assert_eq!(hero.frame().await.headline.as_deref(), Some("PROJECT ANALYSIS IN"));

        time::sleep_until(start + ms(2600)).await;
        let frame = hero.frame().await;
        let hindi = store.get(Language::Hindi).unwrap();
        assert_eq!(frame.language, Language::Hindi);
        assert_eq!(frame.headline.as_deref(), Some(hindi.headline()[0].as_str()));
        assert_eq!(frame.subtitle.as_deref(), Some(hindi.subtitle()[0].as_str()));
        assert_eq!(frame.made_simple.as_deref(), Some(hindi.made_simple()[0].as_str()));
        assert_eq!(frame.cta.as_deref(), Some(hindi.cta()[0].as_str()));
        for (pair, entry) in frame.stats.iter().zip(hindi.stats()) {
            assert_eq!(pair.number, entry.number()[0]);
            assert_eq!(pair.label, entry.label()[0]);
        }

        // Word period restarts from the flip: next advance at 4500ms.
        time::sleep_until(start + ms(4400)).await;
        assert_eq!(hero.frame().await.headline.as_deref(), Some(hindi.headline()[0].as_str()));
        time::sleep_until(start + ms(4600)).await;
        let frame = hero.frame().await;
        assert_eq!(frame.headline.as_deref(), Some(hindi.headline()[1].as_str()));
        assert_lock_step(&store, &frame);
    }

    #[tokio::test(start_paused = true)]
    async fn flip_restarts_lists_shared_between_languages() {
        let start = Instant::now();
        let shared = || bundle(&["S1", "S2", "S3"], &[(&["1", "2"], &["one", "two"])]);
        let store = Arc::new(BundleStore::from_bundles([
            (Language::English, shared()),
            (Language::Hindi, shared()),
        ]));
        let rotator = LanguageRotator::with_languages(&[Language::English, Language::Hindi], LANGUAGE);
        let hero = HeroPresentation::with_rotator(store, rotator, CyclerConfig::instant(WORD));

        time::sleep_until(start + ms(2400)).await;
        let frame = hero.frame().await;
        assert_eq!(frame.headline.as_deref(), Some("S2"));
        assert_eq!(frame.stats[0].number, "2");

        time::sleep_until(start + ms(2600)).await;
        let frame = hero.frame().await;
        assert_eq!(frame.language, Language::Hindi);
        assert_eq!(frame.headline.as_deref(), Some("S1"));
        assert_eq!((frame.stats[0].number.as_str(), frame.stats[0].label.as_str()), ("1", "one"));

        // Period restarts at the flip, so the next advance is at 4500ms.
        time::sleep_until(start + ms(4400)).await;
        assert_eq!(hero.frame().await.headline.as_deref(), Some("S1"));
        time::sleep_until(start + ms(4600)).await;
        let frame = hero.frame().await;
        assert_eq!(frame.headline.as_deref(), Some("S2"));
        assert_eq!(frame.stats[0].label, "two");
    }

    #[tokio::test(start_paused = true)]
    async fn stats_stay_in_lock_step_over_many_ticks() {
        let start = Instant::now();
        let store = Arc::new(BundleStore::builtin());
        let config = HeroConfig {
            word_period: ms(300),
            ..config()
        };
        let hero = HeroPresentation::spawn(Arc::clone(&store), &config);

        for step in 0..100u64 {
            time::sleep_until(start + ms(step * 170 + 50)).await;
            let frame = hero.frame().await;
            assert_eq!(frame.stats.len(), 3);
            assert_lock_step(&store, &frame);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn missing_bundle_renders_nothing_then_recovers() {
        let start = Instant::now();
        let store = Arc::new(BundleStore::from_bundles([(
            Language::English,
            bundle(&["E1", "E2"], &[(&["1"], &["one"])]),
        )]));
        let hero = HeroPresentation::spawn(store, &config());

        time::sleep_until(start + ms(2600)).await;
        let frame = hero.frame().await;
        assert_eq!(frame.language, Language::Hindi);
        assert_eq!(frame.headline, None);
        assert_eq!(frame.subtitle, None);
        assert_eq!(frame.cta, None);
        assert!(frame.stats.is_empty());

        // Back to English after a full rotation.
        time::sleep_until(start + ms(10_100)).await;
        let frame = hero.frame().await;
        assert_eq!(frame.language, Language::English);
        assert_eq!(frame.headline.as_deref(), Some("E1"));
        assert_eq!(frame.stats.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stat_cyclers_follow_bundle_stat_count() {
        let start = Instant::now();
        let store = Arc::new(BundleStore::from_bundles([
            (Language::English, bundle(&["E"], &[(&["1"], &["one"])])),
            (
                Language::Hindi,
                bundle(&["H"], &[(&["a", "b"], &["A", "B"]), (&["x"], &["X"])]),
            ),
        ]));
        let rotator = LanguageRotator::with_languages(&[Language::English, Language::Hindi], LANGUAGE);
        let hero = HeroPresentation::with_rotator(store, rotator, CyclerConfig::instant(WORD));

        time::sleep_until(start + ms(100)).await;
        assert_eq!(hero.frame().await.stats.len(), 1);

        time::sleep_until(start + ms(2600)).await;
        let frame = hero.frame().await;
        assert_eq!(
            frame.stats,
            vec![
                StatPair {
                    number: "a".to_owned(),
                    label: "A".to_owned()
                },
                StatPair {
                    number: "x".to_owned(),
                    label: "X".to_owned()
                },
            ]
        );

        time::sleep_until(start + ms(5100)).await;
        assert_eq!(hero.frame().await.stats.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn acknowledge_exits_completes_scene_change() {
        let start = Instant::now();
        let config = HeroConfig {
            transition: TransitionMode::Acknowledged,
            ..config()
        };
        let hero = HeroPresentation::spawn(Arc::new(BundleStore::builtin()), &config);

        time::sleep_until(start + ms(2100)).await;
        assert_eq!(hero.frame().await.headline.as_deref(), Some("DPR ASSESSMENT IN"));

        hero.acknowledge_exits().await;
        time::sleep(ms(10)).await;
        let frame = hero.frame().await;
        assert_eq!(frame.headline.as_deref(), Some("PROJECT ANALYSIS IN"));
        assert_eq!(frame.cta.as_deref(), Some("Begin Now"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_all_timers() {
        let hero = HeroPresentation::spawn(Arc::new(BundleStore::builtin()), &config());
        let languages = hero.subscribe_language();

        hero.shutdown().await;
        time::sleep(LANGUAGE * 4).await;

        assert_eq!(*languages.borrow(), Language::English);
        assert!(languages.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_rotation() {
        let hero = HeroPresentation::spawn(Arc::new(BundleStore::builtin()), &config());
        let languages = hero.subscribe_language();
        drop(hero);

        time::sleep(LANGUAGE * 4).await;
        assert!(languages.has_changed().is_err());
    }
}
