//! The color editor: one canonical RGB value, three synchronized views.
//!
//! Every edit, whichever representation it comes from, is clamped, folded
//! into the canonical RGB, and then *all* views (the edited one included)
//! are regenerated from RGB and pushed to the observer. Rounding can
//! therefore nudge the field the user just set; the views never diverge.

use tracing::debug;

use crate::color::{Cmyk, ColorViews, Hsv, Rgb};
use crate::convert::{cmyk_to_rgb, hsv_to_rgb};
use crate::hex::parse_hex;

/// A user edit to one of the three representations. Values may be out of
/// range; they are clamped before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    Rgb([i32; 3]),
    Cmyk([f64; 4]),
    Hsv([f64; 3]),
}

impl Edit {
    /// Clamp the edited fields and fold them into an RGB value.
    fn resolve(self) -> Rgb {
        match self {
            Self::Rgb([r, g, b]) => Rgb::from_clamped(r, g, b),
            Self::Cmyk([c, m, y, k]) => cmyk_to_rgb(Cmyk::new(c, m, y, k).clamped()),
            Self::Hsv([h, s, v]) => hsv_to_rgb(Hsv::new(h, s, v).clamped()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The edit was committed; these are the regenerated views.
    Applied(ColorViews),
    /// An update was already in progress, so the edit was dropped.
    Suppressed,
}

/// Receives the regenerated views after every committed edit.
///
/// An observer bound to a retained widget toolkit typically fires its own
/// change callbacks while it is being refreshed. Returning `Some(edit)`
/// models that: the edit is fed straight back into the editor, which drops
/// it because an update is already in progress.
pub trait ColorObserver {
    fn color_changed(&mut self, views: &ColorViews) -> Option<Edit>;
}

impl ColorObserver for () {
    fn color_changed(&mut self, _views: &ColorViews) -> Option<Edit> {
        None
    }
}

/// Several observers behind one editor. Every observer sees every push; the
/// first echo is returned, and it is suppressed like any other.
impl ColorObserver for Vec<Box<dyn ColorObserver>> {
    fn color_changed(&mut self, views: &ColorViews) -> Option<Edit> {
        self.iter_mut()
            .fold(None, |echo, observer| echo.or(observer.color_changed(views)))
    }
}

/// Holds the canonical color and keeps an observer in sync with it.
pub struct ColorEditor<O: ColorObserver = ()> {
    rgb: Rgb,
    updating: bool,
    observer: O,
}

impl<O: ColorObserver> ColorEditor<O> {
    /// Start from black and push the initial views to `observer`.
    pub fn new(observer: O) -> Self {
        Self::with_color(Rgb::BLACK, observer)
    }

    pub fn with_color(rgb: Rgb, observer: O) -> Self {
        let mut editor = Self {
            rgb,
            updating: false,
            observer,
        };
        editor.apply(Edit::Rgb([rgb.r as i32, rgb.g as i32, rgb.b as i32]));
        editor
    }

    /// The canonical color.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// All views derived from the canonical color.
    pub fn views(&self) -> ColorViews {
        ColorViews::from_rgb(self.rgb)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access for binding widgets. Writes made here are not edits;
    /// feed them back through [`apply`](Self::apply).
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Whether an update is currently being propagated.
    #[inline]
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Commit an edit and push the regenerated views to the observer.
    pub fn apply(&mut self, edit: Edit) -> EditOutcome {
        let committed = self.guarded(|editor| {
            editor.rgb = edit.resolve();
            let views = ColorViews::from_rgb(editor.rgb);
            if let Some(echo) = editor.observer.color_changed(&views) {
                let nested = editor.apply(echo);
                debug_assert_eq!(nested, EditOutcome::Suppressed);
            }
            views
        });

        match committed {
            Some(views) => {
                debug!("Color set to {} via {:?}", views.hex, edit);
                EditOutcome::Applied(views)
            }
            None => {
                debug!("Suppressed re-entrant edit {:?}", edit);
                EditOutcome::Suppressed
            }
        }
    }

    /// Select a palette color. Unparseable input is silently ignored.
    pub fn select_hex(&mut self, hex: &str) -> Option<ColorViews> {
        let rgb = parse_hex(hex).ok()?;
        match self.apply(Edit::Rgb([rgb.r as i32, rgb.g as i32, rgb.b as i32])) {
            EditOutcome::Applied(views) => Some(views),
            EditOutcome::Suppressed => None,
        }
    }

    /// Run `f` with the updating flag raised. Returns `None` without running
    /// `f` if the flag is already up.
    fn guarded<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if self.updating {
            return None;
        }
        self.updating = true;
        let result = f(self);
        self.updating = false;
        Some(result)
    }
}

impl Default for ColorEditor<()> {
    fn default() -> Self {
        Self::new(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{rgb_to_cmyk, rgb_to_hsv};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Records every push and echoes each one back as a fresh edit, the way
    /// a retained toolkit's variable traces would.
    #[derive(Default)]
    struct EchoObserver {
        pushes: Vec<ColorViews>,
    }

    impl ColorObserver for EchoObserver {
        fn color_changed(&mut self, views: &ColorViews) -> Option<Edit> {
            self.pushes.push(views.clone());
            Some(Edit::Cmyk([
                views.cmyk.c,
                views.cmyk.m,
                views.cmyk.y,
                views.cmyk.k,
            ]))
        }
    }

    struct Counting(Rc<Cell<usize>>);

    impl ColorObserver for Counting {
        fn color_changed(&mut self, _views: &ColorViews) -> Option<Edit> {
            self.0.set(self.0.get() + 1);
            None
        }
    }

    #[test]
    fn every_observer_in_a_list_is_notified() {
        let first = Rc::new(Cell::new(0));
        let last = Rc::new(Cell::new(0));
        let observers: Vec<Box<dyn ColorObserver>> = vec![
            Box::new(Counting(first.clone())),
            Box::new(EchoObserver::default()),
            Box::new(Counting(last.clone())),
        ];
        let mut editor = ColorEditor::new(observers);
        editor.apply(Edit::Hsv([120.0, 100.0, 100.0]));
        // Construction plus one edit, for every observer despite the echo.
        assert_eq!(first.get(), 2);
        assert_eq!(last.get(), 2);
        assert_eq!(editor.rgb(), Rgb::new(0, 255, 0));
        assert!(!editor.is_updating());
    }

    #[test]
    fn starts_black_and_syncs_observer() {
        let editor = ColorEditor::new(EchoObserver::default());
        assert_eq!(editor.rgb(), Rgb::BLACK);
        assert_eq!(editor.observer().pushes.len(), 1);
        assert_eq!(editor.observer().pushes[0].cmyk, Cmyk::new(0.0, 0.0, 0.0, 100.0));
        assert!(!editor.is_updating());
    }

    #[test]
    fn echoing_observer_does_not_recurse() {
        let mut editor = ColorEditor::new(EchoObserver::default());
        let outcome = editor.apply(Edit::Rgb([10, 200, 30]));
        assert!(matches!(outcome, EditOutcome::Applied(_)));
        // One push for construction, one for the edit; echoes were dropped.
        assert_eq!(editor.observer().pushes.len(), 2);
        assert_eq!(editor.rgb(), Rgb::new(10, 200, 30));
        assert!(!editor.is_updating());
    }

    #[test]
    fn rgb_edit_is_clamped() {
        let mut editor = ColorEditor::default();
        editor.apply(Edit::Rgb([-40, 128, 999]));
        assert_eq!(editor.rgb(), Rgb::new(0, 128, 255));
    }

    #[test]
    fn cmyk_edit_regenerates_all_views() {
        let mut editor = ColorEditor::default();
        let EditOutcome::Applied(views) = editor.apply(Edit::Cmyk([150.0, 0.0, 0.0, 0.0])) else {
            panic!("edit should apply");
        };
        assert_eq!(views.rgb, Rgb::new(0, 255, 255));
        // The edited view is regenerated from RGB, so C reads back as 100.
        assert_eq!(views.cmyk, rgb_to_cmyk(views.rgb));
        assert_eq!(views.cmyk.c, 100.0);
        assert_eq!(views.hsv, rgb_to_hsv(views.rgb));
        assert_eq!(views.hex, "#00FFFF");
    }

    #[test]
    fn hsv_edit_wraps_hue() {
        let mut editor = ColorEditor::default();
        editor.apply(Edit::Hsv([480.0, 100.0, 100.0]));
        assert_eq!(editor.rgb(), Rgb::new(0, 255, 0));
        assert_eq!(editor.views().hsv.h, 120.0);
    }

    #[test]
    fn hsv_edit_may_perturb_edited_field() {
        let mut editor = ColorEditor::default();
        let EditOutcome::Applied(views) = editor.apply(Edit::Hsv([200.0, 33.3, 47.1])) else {
            panic!("edit should apply");
        };
        assert_eq!(views.hsv, rgb_to_hsv(views.rgb));
    }

    #[test]
    fn select_hex_sets_color() {
        let mut editor = ColorEditor::new(EchoObserver::default());
        let views = editor.select_hex("#abc").expect("valid hex");
        assert_eq!(views.rgb, Rgb::new(0xAA, 0xBB, 0xCC));
        assert_eq!(views.hex, "#AABBCC");
        assert_eq!(editor.observer().pushes.len(), 2);
    }

    #[test]
    fn select_bad_hex_is_silent_noop() {
        let mut editor = ColorEditor::with_color(Rgb::new(1, 2, 3), EchoObserver::default());
        assert!(editor.select_hex("#nothex").is_none());
        assert_eq!(editor.rgb(), Rgb::new(1, 2, 3));
        assert_eq!(editor.observer().pushes.len(), 1);
    }
}
