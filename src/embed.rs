//! Embeddable video references and ownership of the provider widget.

use url::Url;

use crate::models::{LessonLink, LinkKind};

/// A video the provider widget can play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub video_id: String,
    pub start_seconds: u32,
}

impl Embed {
    pub fn embed_url(&self) -> String {
        let base = format!(
            "https://www.youtube.com/embed/{}",
            urlencoding::encode(&self.video_id)
        );
        if self.start_seconds > 0 {
            format!("{base}?start={}", self.start_seconds)
        } else {
            base
        }
    }
}

/// Parses `youtu.be/<id>`, `/watch?v=<id>`, `/shorts/<id>` and `/embed/<id>`
/// URLs, honouring a `t=` (or `start=`) offset.
pub fn parse_youtube(raw: &str) -> Option<Embed> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let video_id = if host == "youtu.be" {
        segments.next()?.to_string()
    } else if host == "youtube.com" || host.ends_with(".youtube.com") {
        match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())?,
            "shorts" | "embed" => segments.next()?.to_string(),
            _ => return None,
        }
    } else {
        return None;
    };
    if video_id.is_empty() {
        return None;
    }

    let start_seconds = url
        .query_pairs()
        .find(|(k, _)| k == "t" || k == "start")
        .and_then(|(_, v)| parse_offset(&v))
        .unwrap_or(0);

    Some(Embed {
        video_id,
        start_seconds,
    })
}

/// `90`, `90s` or `1h2m3s`.
fn parse_offset(raw: &str) -> Option<u32> {
    if let Ok(secs) = raw.parse::<u32>() {
        return Some(secs);
    }

    let mut total = 0u32;
    let mut digits = String::new();
    for c in raw.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let value: u32 = digits.parse().ok()?;
        digits.clear();
        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = value.checked_mul(unit).and_then(|secs| total.checked_add(secs))?;
    }
    digits.is_empty().then_some(total)
}

impl LessonLink {
    /// The provider reference for this link, if it can be embedded.
    pub fn embed(&self) -> Option<Embed> {
        if let Some(embed) = self.embed_url.as_deref().and_then(parse_youtube) {
            return Some(embed);
        }
        match self.kind {
            LinkKind::Youtube => self
                .url
                .as_deref()
                .or(self.href.as_deref())
                .and_then(parse_youtube),
            _ => None,
        }
    }

    pub fn is_embeddable(&self) -> bool {
        self.embed().is_some()
    }
}

/// Provider player states, as reported by the widget's state-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlaybackState {
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            -1 => PlaybackState::Unstarted,
            0 => PlaybackState::Ended,
            1 => PlaybackState::Playing,
            2 => PlaybackState::Paused,
            3 => PlaybackState::Buffering,
            5 => PlaybackState::Cued,
            _ => return None,
        })
    }
}

/// A live provider player mounted into the page.
pub trait VideoWidget {
    fn play(&self);
    fn pause(&self);
    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    /// Video length in seconds, `0` until the provider knows it.
    fn duration(&self) -> f64;
    fn destroy(&mut self);
}

/// Single owner of a widget instance. Replacing or dropping the slot destroys
/// the previous widget so no player outlives its view.
pub struct WidgetSlot<W: VideoWidget> {
    widget: Option<W>,
}

impl<W: VideoWidget> Default for WidgetSlot<W> {
    fn default() -> Self {
        Self { widget: None }
    }
}

impl<W: VideoWidget> WidgetSlot<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, widget: W) {
        self.clear();
        self.widget = Some(widget);
    }

    pub fn clear(&mut self) {
        if let Some(mut old) = self.widget.take() {
            old.destroy();
        }
    }

    pub fn get(&self) -> Option<&W> {
        self.widget.as_ref()
    }
}

impl<W: VideoWidget> Drop for WidgetSlot<W> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Keeps the sign-language video in step with the main video.
pub fn mirror<W: VideoWidget>(state: PlaybackState, sign: &W) {
    match state {
        PlaybackState::Playing => sign.play(),
        PlaybackState::Paused | PlaybackState::Ended => sign.pause(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn parses_common_youtube_forms() {
        let cases = [
            ("https://youtu.be/abc123", "abc123", 0),
            ("https://www.youtube.com/watch?v=abc123&t=90", "abc123", 90),
            ("https://youtube.com/shorts/xyz?t=1m30s", "xyz", 90),
            ("https://www.youtube.com/embed/e1?start=5", "e1", 5),
            ("https://m.youtube.com/watch?v=m1&t=1h0m2s", "m1", 3602),
        ];
        for (raw, id, start) in cases {
            let embed = parse_youtube(raw).unwrap();
            assert_eq!(embed.video_id, id, "{raw}");
            assert_eq!(embed.start_seconds, start, "{raw}");
        }
    }

    #[test]
    fn rejects_non_youtube_or_incomplete() {
        for raw in [
            "https://vimeo.com/123",
            "https://www.youtube.com/watch",
            "https://www.youtube.com/channel/abc",
            "not a url",
            "https://evilyoutube.com/watch?v=1",
        ] {
            assert_eq!(parse_youtube(raw), None, "{raw}");
        }
    }

    #[test]
    fn bad_offset_is_ignored() {
        let embed = parse_youtube("https://youtu.be/a?t=soon").unwrap();
        assert_eq!(embed.start_seconds, 0);
        assert_eq!(embed.embed_url(), "https://www.youtube.com/embed/a");

        for raw in [
            "https://youtu.be/abc?t=2000000h",
            "https://youtu.be/abc?t=4294967295s1s",
            "https://youtu.be/abc?t=99999999999",
        ] {
            let embed = parse_youtube(raw).unwrap();
            assert_eq!(embed.video_id, "abc", "{raw}");
            assert_eq!(embed.start_seconds, 0, "{raw}");
        }
    }

    #[test]
    fn link_embeddability() {
        let youtube = LessonLink {
            kind: LinkKind::Youtube,
            url: Some("https://youtu.be/v1?t=10".to_string()),
            ..Default::default()
        };
        assert_eq!(
            youtube.embed().map(|e| e.embed_url()).as_deref(),
            Some("https://www.youtube.com/embed/v1?start=10")
        );

        let external = LessonLink {
            kind: LinkKind::External,
            href: Some("https://youtu.be/v1".to_string()),
            ..Default::default()
        };
        assert!(!external.is_embeddable());

        let explicit = LessonLink {
            embed_url: Some("https://www.youtube.com/embed/v2".to_string()),
            ..Default::default()
        };
        assert!(explicit.is_embeddable());
    }

    #[derive(Default)]
    struct Calls(Rc<RefCell<Vec<String>>>);

    struct FakeWidget {
        name: &'static str,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl VideoWidget for FakeWidget {
        fn play(&self) {
            self.calls.borrow_mut().push(format!("{}:play", self.name));
        }
        fn pause(&self) {
            self.calls.borrow_mut().push(format!("{}:pause", self.name));
        }
        fn current_time(&self) -> f64 {
            0.0
        }
        fn duration(&self) -> f64 {
            0.0
        }
        fn destroy(&mut self) {
            self.calls.borrow_mut().push(format!("{}:destroy", self.name));
        }
    }

    #[test]
    fn slot_destroys_on_replace_clear_and_drop() {
        let calls = Calls::default();
        let widget = |name| FakeWidget {
            name,
            calls: calls.0.clone(),
        };

        {
            let mut slot = WidgetSlot::new();
            slot.replace(widget("a"));
            slot.replace(widget("b"));
            assert!(slot.get().is_some());
            slot.clear();
            assert!(slot.get().is_none());
            slot.clear();
            slot.replace(widget("c"));
        }

        assert_eq!(*calls.0.borrow(), vec!["a:destroy", "b:destroy", "c:destroy"]);
    }

    #[test]
    fn sign_video_follows_main_video() {
        let calls = Calls::default();
        let sign = FakeWidget {
            name: "sign",
            calls: calls.0.clone(),
        };
        mirror(PlaybackState::Playing, &sign);
        mirror(PlaybackState::Buffering, &sign);
        mirror(PlaybackState::Paused, &sign);
        mirror(PlaybackState::Ended, &sign);
        assert_eq!(*calls.0.borrow(), vec!["sign:play", "sign:pause", "sign:pause"]);
    }

    #[test]
    fn state_codes() {
        assert_eq!(PlaybackState::from_code(0), Some(PlaybackState::Ended));
        assert_eq!(PlaybackState::from_code(1), Some(PlaybackState::Playing));
        assert_eq!(PlaybackState::from_code(4), None);
    }
}
