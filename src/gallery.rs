//! Lightbox state machine: open/close, cyclic navigation, click zones and swipes.
//!
//! All DOM work goes through [`GalleryView`], so the controller runs the same
//! way in the browser and in host tests.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryImage {
    pub src: String,
    pub label: String,
}

impl GalleryImage {
    pub fn new(src: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            label: label.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GalleryState {
    Closed,
    Open(usize),
}

/// Keys the lightbox reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Escape" | "Esc" => Some(Key::Escape),
            "ArrowLeft" | "Left" => Some(Key::ArrowLeft),
            "ArrowRight" | "Right" => Some(Key::ArrowRight),
            _ => None,
        }
    }
}

/// The overlay the controller drives.
pub trait GalleryView {
    /// Makes the overlay visible and locks page scroll.
    fn show(&mut self);
    /// Hides the overlay and restores page scroll.
    fn hide(&mut self);
    /// Swaps in `image`. The view places the caption once the image has loaded.
    fn display(&mut self, image: &GalleryImage);
    /// Re-anchors the caption to the bottom edge of the current image.
    fn place_caption(&mut self);
}

pub struct GalleryController<V> {
    images: Vec<GalleryImage>,
    state: GalleryState,
    touch_start_x: Option<f64>,
    touch_end_x: Option<f64>,
    swipe_threshold: f64,
    view: V,
}

impl<V: GalleryView> GalleryController<V> {
    pub fn new(images: Vec<GalleryImage>, swipe_threshold: f64, view: V) -> Self {
        log::debug!("gallery with {} images", images.len());
        Self {
            images,
            state: GalleryState::Closed,
            touch_start_x: None,
            touch_end_x: None,
            swipe_threshold,
            view,
        }
    }

    pub fn state(&self) -> GalleryState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, GalleryState::Open(_))
    }

    /// Opens the overlay on `index`, clamped to the last image.
    pub fn open(&mut self, index: usize) {
        let Some(last) = self.images.len().checked_sub(1) else {
            log::warn!("gallery has no images; ignoring open({index})");
            return;
        };
        if index > last {
            log::warn!("gallery index {index} out of range, showing {last}");
        }
        let index = index.min(last);
        log::info!("gallery open at {index}");
        self.state = GalleryState::Open(index);
        // A hidden overlay has no layout to anchor the caption to.
        self.view.show();
        self.view.display(&self.images[index]);
    }

    pub fn close(&mut self) {
        if self.is_open() {
            log::info!("gallery closed");
            self.state = GalleryState::Closed;
            self.touch_start_x = None;
            self.touch_end_x = None;
            self.view.hide();
        }
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        let n = self.images.len();
        self.step(n.saturating_sub(1));
    }

    fn step(&mut self, offset: usize) {
        let n = self.images.len();
        if let GalleryState::Open(i) = self.state {
            if n == 0 {
                return;
            }
            let index = (i + offset) % n;
            self.state = GalleryState::Open(index);
            self.view.display(&self.images[index]);
        }
    }

    /// Left half of the displayed image goes back, right half goes forward.
    pub fn on_image_click(&mut self, click_x: f64, image_left: f64, image_width: f64) {
        if click_x < image_left + image_width / 2.0 {
            self.previous();
        } else {
            self.next();
        }
    }

    pub fn on_key(&mut self, key: Key) {
        if !self.is_open() {
            return;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.previous(),
            Key::ArrowRight => self.next(),
        }
    }

    pub fn on_touch_start(&mut self, x: f64) {
        if self.is_open() {
            self.touch_start_x = Some(x);
            self.touch_end_x = None;
        }
    }

    pub fn on_touch_end(&mut self, x: f64) {
        if !self.is_open() {
            return;
        }
        self.touch_end_x = Some(x);
        let (Some(start), Some(end)) = (self.touch_start_x.take(), self.touch_end_x.take()) else {
            return;
        };
        let travel = start - end;
        if travel.abs() > self.swipe_threshold {
            if travel > 0.0 {
                self.next();
            } else {
                self.previous();
            }
        }
    }

    pub fn on_resize(&mut self) {
        if self.is_open() {
            self.view.place_caption();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl GalleryView for Log {
        fn show(&mut self) {
            self.0.push("show".into());
        }
        fn hide(&mut self) {
            self.0.push("hide".into());
        }
        fn display(&mut self, image: &GalleryImage) {
            self.0.push(format!("display {}", image.src));
        }
        fn place_caption(&mut self) {
            self.0.push("caption".into());
        }
    }

    fn gallery(n: usize) -> GalleryController<Log> {
        let images = (0..n)
            .map(|i| GalleryImage::new(format!("img{i}.jpg"), format!("Photo {i}")))
            .collect();
        GalleryController::new(images, 50.0, Log::default())
    }

    #[test]
    fn open_shows_then_displays() {
        let mut g = gallery(3);
        g.open(1);
        assert_eq!(g.state(), GalleryState::Open(1));
        assert_eq!(g.view().0, ["show", "display img1.jpg"]);
    }

    #[test]
    fn reopening_never_displays_into_a_hidden_overlay() {
        #[derive(Default)]
        struct Overlay {
            visible: bool,
            hidden_displays: usize,
        }

        impl GalleryView for Overlay {
            fn show(&mut self) {
                self.visible = true;
            }
            fn hide(&mut self) {
                self.visible = false;
            }
            fn display(&mut self, _: &GalleryImage) {
                if !self.visible {
                    self.hidden_displays += 1;
                }
            }
            fn place_caption(&mut self) {}
        }

        let images = vec![GalleryImage::new("only.jpg", "Only")];
        let mut g = GalleryController::new(images, 50.0, Overlay::default());
        g.open(0);
        g.close();
        g.open(0);
        g.next();
        assert_eq!(g.view().hidden_displays, 0);
    }

    #[test]
    fn each_swipe_needs_its_own_start() {
        let mut g = gallery(3);
        g.open(0);
        g.on_touch_start(300.0);
        g.on_touch_end(200.0);
        assert_eq!(g.state(), GalleryState::Open(1));
        // A second lift without a new touch-down must not reuse the old start.
        g.on_touch_end(100.0);
        assert_eq!(g.state(), GalleryState::Open(1));
    }

    #[test]
    fn open_past_end_clamps() {
        let mut g = gallery(3);
        g.open(9);
        assert_eq!(g.state(), GalleryState::Open(2));
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut g = gallery(4);
        g.open(0);
        g.previous();
        assert_eq!(g.state(), GalleryState::Open(3));
        g.next();
        assert_eq!(g.state(), GalleryState::Open(0));
    }

    #[test]
    fn single_image_stays_put() {
        let mut g = gallery(1);
        g.open(0);
        g.next();
        g.previous();
        assert_eq!(g.state(), GalleryState::Open(0));
    }

    #[test]
    fn empty_gallery_ignores_everything() {
        let mut g = gallery(0);
        g.open(0);
        g.next();
        g.previous();
        g.on_key(Key::ArrowRight);
        g.on_image_click(10.0, 0.0, 100.0);
        assert_eq!(g.state(), GalleryState::Closed);
        assert!(g.view().0.is_empty());
    }

    #[test]
    fn closed_gallery_ignores_navigation() {
        let mut g = gallery(3);
        g.next();
        g.on_key(Key::Escape);
        g.on_touch_start(200.0);
        g.on_touch_end(0.0);
        g.on_resize();
        assert_eq!(g.state(), GalleryState::Closed);
        assert!(g.view().0.is_empty());
    }

    #[test]
    fn keys_drive_navigation_and_close() {
        let mut g = gallery(3);
        g.open(0);
        g.on_key(Key::ArrowRight);
        assert_eq!(g.state(), GalleryState::Open(1));
        g.on_key(Key::ArrowLeft);
        g.on_key(Key::ArrowLeft);
        assert_eq!(g.state(), GalleryState::Open(2));
        g.on_key(Key::Escape);
        assert_eq!(g.state(), GalleryState::Closed);
        assert_eq!(g.view().0.last().map(String::as_str), Some("hide"));
    }

    #[test]
    fn key_names_map_from_dom_values() {
        assert_eq!(Key::from_name("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_name("ArrowRight"), Some(Key::ArrowRight));
        assert_eq!(Key::from_name("Enter"), None);
    }

    #[test]
    fn resize_replaces_caption_only_while_open() {
        let mut g = gallery(2);
        g.on_resize();
        g.open(0);
        g.on_resize();
        assert_eq!(g.view().0, ["show", "display img0.jpg", "caption"]);
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut g = gallery(3);
        g.open(1);
        g.on_touch_end(0.0);
        assert_eq!(g.state(), GalleryState::Open(1));
    }
}
