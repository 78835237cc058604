use tracing::{debug, info};

use super::sound::{SoundBank, SoundHandle};
use super::AudioAuthority;
use crate::config::AudioConfig;
use crate::error::AudioError;

type Loader<H> = Box<dyn Fn(&str) -> H>;

/// Self-contained authority for pages that do not embed a player frame. It
/// owns the looping background track and every sound effect.
pub struct LocalAudioManager<H> {
    config: AudioConfig,
    load: Loader<H>,
    bgm: Option<H>,
    sounds: SoundBank<H>,
}

impl<H: SoundHandle> LocalAudioManager<H> {
    /// `load` turns an asset path into a handle. Nothing is loaded until
    /// [`LocalAudioManager::init`].
    pub fn new<F>(config: AudioConfig, load: F) -> Self
    where
        F: Fn(&str) -> H + 'static,
    {
        Self {
            config,
            load: Box::new(load),
            bgm: None,
            sounds: SoundBank::default(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.bgm.is_some()
    }

    pub fn bgm(&self) -> Option<&H> {
        self.bgm.as_ref()
    }

    pub fn sounds(&self) -> &SoundBank<H> {
        &self.sounds
    }

    pub fn init(&mut self) {
        if self.is_initialized() {
            return;
        }

        let bgm = (self.load)(&self.config.bgm_path());
        bgm.set_looping(true);
        bgm.set_volume(self.config.bgm_volume);
        self.sounds = SoundBank::load(&self.config, |path| (self.load)(path));
        self.bgm = Some(bgm);
        info!("audio manager initialized");
    }

    pub fn play_bgm(&mut self) -> Result<(), AudioError> {
        let Some(bgm) = self.bgm.as_ref() else {
            debug!("bgm requested before audio init");
            return Err(AudioError::NotInitialized);
        };
        bgm.play().inspect_err(|err| {
            info!(error = %err, "bgm autoplay prevented, will play on user interaction");
        })
    }

    pub fn stop_bgm(&mut self) {
        if let Some(bgm) = self.bgm.as_ref() {
            bgm.pause();
            bgm.rewind();
        }
    }

    /// Loads the handles first if needed: page click handlers run before the
    /// document-level unlock listener, so the first effect can precede it.
    pub fn play(&mut self, name: &str) -> Result<(), AudioError> {
        self.init();
        self.sounds.play(name)
    }

    pub fn enable_audio(&mut self) -> Result<(), AudioError> {
        self.init();
        self.play_bgm()
    }
}

impl<H: SoundHandle> AudioAuthority for LocalAudioManager<H> {
    fn init(&mut self) -> Result<(), AudioError> {
        LocalAudioManager::init(self);
        Ok(())
    }

    fn play_bgm(&mut self) -> Result<(), AudioError> {
        LocalAudioManager::play_bgm(self)
    }

    fn stop_bgm(&mut self) -> Result<(), AudioError> {
        LocalAudioManager::stop_bgm(self);
        Ok(())
    }

    fn play(&mut self, name: &str) -> Result<(), AudioError> {
        LocalAudioManager::play(self, name)
    }

    fn enable_audio(&mut self) -> Result<(), AudioError> {
        LocalAudioManager::enable_audio(self)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::audio::testing::{CallLog, MockSound};
    use crate::audio::{AudioContext, InteractionGate, InteractionKind, SoundName};

    fn manager(log: &CallLog, loads: &Rc<Cell<u32>>) -> LocalAudioManager<MockSound> {
        let log = log.clone();
        let loads = loads.clone();
        LocalAudioManager::new(AudioConfig::default(), move |path| {
            loads.set(loads.get() + 1);
            MockSound::new(path, log.clone())
        })
    }

    #[test]
    fn init_is_idempotent() {
        let log = CallLog::default();
        let loads = Rc::new(Cell::new(0));
        let mut manager = manager(&log, &loads);
        assert!(!manager.is_initialized());

        manager.init();
        let after_first = loads.get();
        assert_eq!(after_first, 10);
        manager.init();
        assert_eq!(loads.get(), after_first);
        assert_eq!(manager.sounds().len(), 9);

        let bgm = manager.bgm().expect("bgm loaded");
        assert_eq!(bgm.path, "/static/assets/sound/bgm-fortune-hands.mp3");
        assert!(bgm.looping.get());
        assert_eq!(bgm.volume(), 0.3);
        assert_eq!(
            manager.sounds().get(SoundName::YouWin).map(|s| s.volume()),
            Some(0.5)
        );
    }

    #[test]
    fn play_bgm_before_init_is_a_noop() {
        let log = CallLog::default();
        let loads = Rc::new(Cell::new(0));
        let mut manager = manager(&log, &loads);
        assert_eq!(manager.play_bgm(), Err(AudioError::NotInitialized));
        manager.stop_bgm();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn stop_bgm_pauses_and_rewinds() {
        let log = CallLog::default();
        let loads = Rc::new(Cell::new(0));
        let mut manager = manager(&log, &loads);
        manager.enable_audio().unwrap();
        let bgm = manager.bgm().unwrap();
        assert!(!bgm.paused());
        assert_eq!(bgm.position.get(), 1.5);

        manager.stop_bgm();
        let bgm = manager.bgm().unwrap();
        assert!(bgm.paused());
        assert_eq!(bgm.position.get(), 0.0);
    }

    #[test]
    fn autoplay_rejection_is_swallowed_into_a_value() {
        let log = CallLog::default();
        let loads = Rc::new(Cell::new(0));
        let mut manager = manager(&log, &loads);
        manager.init();
        manager.bgm().unwrap().reject.set(true);
        let result = manager.enable_audio();
        assert!(matches!(result, Err(AudioError::PlaybackRejected { .. })));
        assert!(manager.is_initialized());
    }

    #[test]
    fn first_effect_plays_before_the_unlock_gate() {
        let log = CallLog::default();
        let loads = Rc::new(Cell::new(0));
        let context = AudioContext::new(manager(&log, &loads));
        let gate_context = context.clone();
        let mut gate = InteractionGate::new(move || {
            gate_context.enable_audio().unwrap();
        });

        assert_eq!(context.play("click"), Ok(()));
        assert!(gate.fire(InteractionKind::Click));
        assert_eq!(loads.get(), 10);
        assert_eq!(
            *log.borrow(),
            vec![
                "rewind /static/assets/sound/click.wav",
                "play /static/assets/sound/click.wav",
                "play /static/assets/sound/bgm-fortune-hands.mp3",
            ]
        );
    }

    #[test]
    fn unknown_effect_leaves_state_alone() {
        let log = CallLog::default();
        let loads = Rc::new(Cell::new(0));
        let mut manager = manager(&log, &loads);
        manager.init();
        assert_eq!(
            manager.play("boing"),
            Err(AudioError::UnknownSound("boing".to_string()))
        );
        assert!(log.borrow().is_empty());
    }
}
