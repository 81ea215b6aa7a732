//! The hosted YouTube player, driven through the IFrame API script the shell
//! loads into the page.

use crate::embed::{Embed, PlaybackState, VideoWidget};

#[cfg(feature = "hydrate")]
pub use self::client::*;

#[cfg(feature = "hydrate")]
mod client {
    use js_sys::{Object, Reflect};
    use log::{debug, warn};
    use wasm_bindgen::{prelude::*, JsCast};
    use web_sys::Element;

    use super::*;

    #[wasm_bindgen(js_namespace = YT)]
    extern "C" {
        type Player;

        #[wasm_bindgen(constructor, catch)]
        fn new(target: &Element, options: &Object) -> Result<Player, JsValue>;

        #[wasm_bindgen(method, catch, js_name = playVideo)]
        fn play_video(this: &Player) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = pauseVideo)]
        fn pause_video(this: &Player) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = getCurrentTime)]
        fn get_current_time(this: &Player) -> Result<f64, JsValue>;

        #[wasm_bindgen(method, catch, js_name = getDuration)]
        fn get_duration(this: &Player) -> Result<f64, JsValue>;

        #[wasm_bindgen(method, catch)]
        fn destroy(this: &Player) -> Result<(), JsValue>;
    }

    pub struct YoutubeWidget {
        player: Player,
        host: Element,
        _on_state: Closure<dyn FnMut(JsValue)>,
    }

    impl YoutubeWidget {
        /// Mounts a player into a fresh element appended to `container_id`.
        pub fn create(
            container_id: &str,
            embed: &Embed,
            mut on_state: impl FnMut(PlaybackState) + 'static,
        ) -> Option<Self> {
            let document = web_sys::window()?.document()?;
            let container = document.get_element_by_id(container_id)?;
            let host = document.create_element("div").ok()?;
            container.append_child(&host).ok()?;

            let callback = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
                let code = Reflect::get(&event, &JsValue::from_str("data"))
                    .ok()
                    .and_then(|d| d.as_f64());
                if let Some(state) = code.and_then(|c| PlaybackState::from_code(c as i32)) {
                    on_state(state);
                }
            });

            let player = player_options(embed, &callback).and_then(|options| Player::new(&host, &options));
            match player {
                Ok(player) => {
                    debug!("Mounted video {} into #{container_id}", embed.video_id);
                    Some(Self {
                        player,
                        host,
                        _on_state: callback,
                    })
                }
                Err(e) => {
                    warn!("Could not create player for {}: {e:?}", embed.video_id);
                    host.remove();
                    None
                }
            }
        }
    }

    fn player_options(embed: &Embed, on_state: &Closure<dyn FnMut(JsValue)>) -> Result<Object, JsValue> {
        let vars = Object::new();
        Reflect::set(&vars, &"start".into(), &embed.start_seconds.into())?;
        Reflect::set(&vars, &"playsinline".into(), &1.into())?;
        Reflect::set(&vars, &"rel".into(), &0.into())?;

        let events = Object::new();
        Reflect::set(&events, &"onStateChange".into(), on_state.as_ref().unchecked_ref())?;

        let options = Object::new();
        Reflect::set(&options, &"videoId".into(), &embed.video_id.as_str().into())?;
        Reflect::set(&options, &"playerVars".into(), &vars)?;
        Reflect::set(&options, &"events".into(), &events)?;
        Ok(options)
    }

    impl VideoWidget for YoutubeWidget {
        // The player's methods only exist once it reports ready, so early
        // calls fail and are ignored.
        fn play(&self) {
            if let Err(e) = self.player.play_video() {
                debug!("playVideo ignored: {e:?}");
            }
        }

        fn pause(&self) {
            if let Err(e) = self.player.pause_video() {
                debug!("pauseVideo ignored: {e:?}");
            }
        }

        fn current_time(&self) -> f64 {
            self.player.get_current_time().unwrap_or(0.0)
        }

        fn duration(&self) -> f64 {
            self.player.get_duration().unwrap_or(0.0)
        }

        fn destroy(&mut self) {
            if let Err(e) = self.player.destroy() {
                debug!("destroy failed: {e:?}");
            }
            self.host.remove();
        }
    }

    /// Whether the IFrame API script has finished loading.
    pub fn api_ready() -> bool {
        Reflect::get(&js_sys::global(), &"YT".into())
            .ok()
            .filter(|yt| yt.is_object())
            .and_then(|yt| Reflect::get(&yt, &"Player".into()).ok())
            .is_some_and(|player| player.is_function())
    }

    pub fn container_exists(id: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .is_some()
    }
}

/// Server-side stand-in; nothing is ever mounted outside the browser.
#[cfg(not(feature = "hydrate"))]
pub struct YoutubeWidget;

#[cfg(not(feature = "hydrate"))]
impl YoutubeWidget {
    pub fn create(
        _container_id: &str,
        _embed: &Embed,
        _on_state: impl FnMut(PlaybackState) + 'static,
    ) -> Option<Self> {
        None
    }
}

#[cfg(not(feature = "hydrate"))]
impl VideoWidget for YoutubeWidget {
    fn play(&self) {}

    fn pause(&self) {}

    fn current_time(&self) -> f64 {
        0.0
    }

    fn duration(&self) -> f64 {
        0.0
    }

    fn destroy(&mut self) {}
}

#[cfg(not(feature = "hydrate"))]
pub fn api_ready() -> bool {
    false
}

#[cfg(not(feature = "hydrate"))]
pub fn container_exists(_id: &str) -> bool {
    false
}
