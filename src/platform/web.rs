// Browser build: audio elements, frames and window messaging via web-sys.
use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use js_sys::JSON;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, AddEventListenerOptions, HtmlAudioElement, HtmlIFrameElement, MessageEvent, Window,
};

use crate::audio::{
    best_effort, AudioAuthority, AudioCommand, AudioContext, AudioController, AudioRelay,
    CommandSink, InteractionGate, InteractionKind, LocalAudioManager, NavMessage, ParentFrame,
    PlayerEndpoint, RelayCall, RelayEnvelope, RelayHost, RelayMessage, SoundBank, SoundHandle,
};
use crate::config::{AudioConfig, AudioMode, CONFIG_ELEMENT_ID};
use crate::error::AudioError;

/// An `<audio>` element created off-document, one per asset.
pub struct HtmlSound {
    src: String,
    element: Option<HtmlAudioElement>,
}

impl HtmlSound {
    pub fn new(src: &str) -> Self {
        let element = HtmlAudioElement::new_with_src(src).ok();
        match element.as_ref() {
            Some(audio) => audio.set_preload("auto"),
            None => warn!(src, "could not create audio element"),
        }
        Self {
            src: src.to_string(),
            element,
        }
    }
}

impl SoundHandle for HtmlSound {
    fn set_volume(&self, volume: f64) {
        if let Some(audio) = self.element.as_ref() {
            audio.set_volume(volume);
        }
    }

    fn set_looping(&self, looping: bool) {
        if let Some(audio) = self.element.as_ref() {
            audio.set_loop(looping);
        }
    }

    fn rewind(&self) {
        if let Some(audio) = self.element.as_ref() {
            audio.set_current_time(0.0);
        }
    }

    fn pause(&self) {
        if let Some(audio) = self.element.as_ref() {
            let _ = audio.pause();
        }
    }

    fn paused(&self) -> bool {
        self.element.as_ref().map(|audio| audio.paused()).unwrap_or(true)
    }

    fn volume(&self) -> f64 {
        self.element.as_ref().map(|audio| audio.volume()).unwrap_or(0.0)
    }

    /// Autoplay rejections arrive later through the returned promise; those
    /// are only logged.
    fn play(&self) -> Result<(), AudioError> {
        let audio = self.element.as_ref().ok_or_else(|| AudioError::PlaybackRejected {
            name: self.src.clone(),
            reason: "audio element unavailable".to_string(),
        })?;
        let promise = audio.play().map_err(|err| AudioError::PlaybackRejected {
            name: self.src.clone(),
            reason: js_error_text(&err),
        })?;

        let src = self.src.clone();
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                info!(sound = %src, reason = %js_error_text(&err), "could not play");
            }
        });
        Ok(())
    }
}

fn js_error_text(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    js_sys::Reflect::get(err, &"name".into())
        .ok()
        .and_then(|name| name.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

fn post_json<T: Serialize>(target: &Window, message: &T) -> Result<(), AudioError> {
    let text = serde_json::to_string(message)?;
    let value = JSON::parse(&text).map_err(|err| AudioError::Encode(js_error_text(&err)))?;
    // Any origin: the game only ever talks to its own frames.
    target
        .post_message(&value, "*")
        .map_err(|err| AudioError::Transport(js_error_text(&err)))
}

fn message_value(data: &JsValue) -> Option<Value> {
    let text = JSON::stringify(data).ok()?.as_string()?;
    serde_json::from_str(&text).ok()
}

/// Calls `handler` with every message posted to this window, together with
/// the window that sent it.
fn on_message<F>(mut handler: F)
where
    F: FnMut(Value, Option<Window>) + 'static,
{
    let Some(win) = window() else {
        return;
    };
    let callback = Closure::wrap(Box::new(move |event: MessageEvent| {
        let Some(value) = message_value(&event.data()) else {
            return;
        };
        // A frame's WindowProxy comes from another realm, where `instanceof
        // Window` is false; `dyn_into` would drop every child's source.
        let source = event.source().map(|source| source.unchecked_into::<Window>());
        handler(value, source);
    }) as Box<dyn FnMut(MessageEvent)>);
    let _ = win.add_event_listener_with_callback("message", callback.as_ref().unchecked_ref());
    callback.forget();
}

/// The parent window, if this page is embedded in another frame.
pub fn parent_window() -> Option<Window> {
    let win = window()?;
    let parent = win.parent().ok().flatten()?;
    (parent != win).then_some(parent)
}

pub fn is_embedded() -> bool {
    parent_window().is_some()
}

/// Reads an optional JSON override from the page.
pub fn load_config() -> AudioConfig {
    let raw = window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    let Some(raw) = raw else {
        return AudioConfig::default();
    };
    AudioConfig::from_json(&raw).unwrap_or_else(|err| {
        warn!(error = %err, "invalid audio config, using defaults");
        AudioConfig::default()
    })
}

pub fn build_audio_context(config: &AudioConfig) -> AudioContext {
    let parent = parent_window();
    match config.effective_mode(parent.is_some()) {
        AudioMode::Relay => relay_context(parent),
        AudioMode::PlayerFrame => {
            let context = player_frame_context(config);
            host_relay(context.clone());
            context
        }
        AudioMode::Local => {
            let manager = LocalAudioManager::new(config.clone(), HtmlSound::new);
            let context = AudioContext::new(manager);
            host_relay(context.clone());
            context
        }
    }
}

/// Content window of the player frame.
struct FrameSink {
    frame: HtmlIFrameElement,
}

impl CommandSink for FrameSink {
    fn post(&self, command: &AudioCommand) -> Result<(), AudioError> {
        let target = self.frame.content_window().ok_or(AudioError::FrameUnavailable)?;
        post_json(&target, command)
    }
}

fn find_frame(id: &str) -> Option<HtmlIFrameElement> {
    window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlIFrameElement>()
        .ok()
}

fn player_frame_context(config: &AudioConfig) -> AudioContext {
    let sounds = SoundBank::load(config, HtmlSound::new);
    let controller = Rc::new(RefCell::new(AudioController::<FrameSink, HtmlSound>::new(
        config.player_frame_id.clone(),
        sounds,
    )));

    let frame_id = config.player_frame_id.clone();
    let player_url = config.player_url.clone();
    let delay = config.frame_attach_delay_ms;
    let pending = controller.clone();
    spawn_local(async move {
        // Give the frame element time to mount.
        TimeoutFuture::new(delay).await;
        let frame = find_frame(&frame_id);
        let sink = frame.clone().map(|frame| FrameSink { frame });
        if pending.borrow_mut().attach_frame(sink).is_err() {
            return;
        }

        let listener = pending.clone();
        on_message(move |value, _| {
            listener.borrow_mut().handle_raw(&value);
        });
        pending.borrow_mut().listen();

        // Load the player only now, so its ready signal cannot be missed.
        if let Some(frame) = frame {
            frame.set_src(&player_url);
        }
    });

    let shared: Rc<RefCell<dyn AudioAuthority>> = controller;
    AudioContext::from_shared(shared)
}

/// Forwards relayed calls to the parent window.
struct ParentPort {
    parent: Window,
}

impl ParentPort {
    fn send(&self, call: RelayCall) -> Result<(), AudioError> {
        post_json(&self.parent, &RelayEnvelope::new(RelayMessage::RelayCall { call }))
    }
}

impl AudioAuthority for ParentPort {
    fn init(&mut self) -> Result<(), AudioError> {
        self.send(RelayCall::Init)
    }

    fn play_bgm(&mut self) -> Result<(), AudioError> {
        self.send(RelayCall::PlayBgm)
    }

    fn stop_bgm(&mut self) -> Result<(), AudioError> {
        self.send(RelayCall::StopBgm)
    }

    fn play(&mut self, name: &str) -> Result<(), AudioError> {
        self.send(RelayCall::Play {
            name: name.to_string(),
        })
    }

    fn enable_audio(&mut self) -> Result<(), AudioError> {
        self.send(RelayCall::EnableAudio)
    }
}

fn query_parent(parent: &Window) {
    best_effort(
        post_json(parent, &RelayEnvelope::new(RelayMessage::AudioAuthorityQuery)),
        "query parent audio authority",
    );
}

fn relay_context(parent: Option<Window>) -> AudioContext {
    let relay = Rc::new(RefCell::new(AudioRelay::new()));

    if let Some(parent) = parent.as_ref() {
        query_parent(parent);
    }

    {
        let relay = relay.clone();
        on_message(move |value, _| {
            let announced = RelayEnvelope::from_value(&value)
                .is_some_and(|envelope| envelope.message == RelayMessage::AudioAuthorityAnnounce);
            if !announced {
                return;
            }
            let parent = parent_window();
            let frame = ParentFrame::from_lookup(parent.as_ref(), true);
            let Some(parent) = parent else {
                return;
            };
            relay
                .borrow_mut()
                .try_bind(frame, || Box::new(ParentPort { parent }) as Box<dyn AudioAuthority>);
        });
    }

    if let Some(win) = window() {
        // Retry the handshake once the page has loaded.
        let retry = Closure::wrap(Box::new(move || {
            if let Some(parent) = parent_window() {
                query_parent(&parent);
            }
        }) as Box<dyn FnMut()>);
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        let _ = win.add_event_listener_with_callback_and_add_event_listener_options(
            "load",
            retry.as_ref().unchecked_ref(),
            &options,
        );
        retry.forget();

        if let Some(document) = win.document() {
            let clicks = relay.clone();
            let on_click = Closure::wrap(Box::new(move || {
                if let Some(result) = clicks.borrow_mut().on_local_click() {
                    best_effort(result, "click sound");
                }
            }) as Box<dyn FnMut()>);
            let _ = document.add_event_listener_with_callback_and_bool(
                "click",
                on_click.as_ref().unchecked_ref(),
                true,
            );
            on_click.forget();
        }
    }

    let shared: Rc<RefCell<dyn AudioAuthority>> = relay;
    AudioContext::from_shared(shared)
}

/// Lets embedded pages bind to this page's authority.
fn host_relay(context: AudioContext) {
    let host = Rc::new(RefCell::new(RelayHost::new(context)));
    on_message(move |value, source| {
        let Some(envelope) = RelayEnvelope::from_value(&value) else {
            return;
        };
        let reply = host.borrow_mut().handle(envelope.message);
        if let (Some(reply), Some(source)) = (reply, source) {
            debug!("announcing audio authority to child frame");
            best_effort(post_json(&source, &RelayEnvelope::new(reply)), "announce authority");
        }
    });
}

/// Enables audio on the first click, touch or key press. Each listener
/// removes itself after firing.
pub fn install_interaction_gate(context: AudioContext) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let gate = Rc::new(RefCell::new(InteractionGate::new(move || {
        best_effort(context.enable_audio(), "enable audio");
    })));

    for kind in InteractionKind::ALL {
        let gate = gate.clone();
        let callback = Closure::wrap(Box::new(move || {
            gate.borrow_mut().fire(kind);
        }) as Box<dyn FnMut()>);
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
            kind.event_type(),
            callback.as_ref().unchecked_ref(),
            &options,
        );
        callback.forget();
    }
}

pub fn post_to_parent(message: &NavMessage) -> Result<(), AudioError> {
    let parent = parent_window().ok_or(AudioError::FrameUnavailable)?;
    post_json(&parent, message)
}

/// Navigation requests relayed up from embedded pages.
pub fn on_nav_request<F>(mut handler: F)
where
    F: FnMut(String) + 'static,
{
    on_message(move |value, _| {
        if let Some(message) = NavMessage::from_value(&value) {
            handler(message.url);
        }
    });
}

/// Runs the page loaded inside the player frame.
pub fn start_player_endpoint(config: &AudioConfig) {
    let Some(parent) = parent_window() else {
        warn!("audio player page opened outside its frame");
        return;
    };
    let player = Rc::new(RefCell::new(PlayerEndpoint::new(
        HtmlSound::new(&config.bgm_path()),
        config.bgm_volume,
    )));

    {
        let player = player.clone();
        let parent = parent.clone();
        on_message(move |value, _| {
            let Ok(command) = serde_json::from_value::<AudioCommand>(value) else {
                return;
            };
            let reply = player.borrow_mut().handle(&command);
            best_effort(post_json(&parent, &reply), "player reply");
        });
    }

    let ready = player.borrow().ready();
    best_effort(post_json(&parent, &ready), "player ready");
    info!("audio player ready");
}

pub async fn sleep_ms(ms: u32) {
    TimeoutFuture::new(ms).await;
}
