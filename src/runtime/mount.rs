use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    config::DisplayConfig,
    engine::DotMatrixEngine,
    foundation::error::DotMatrixResult,
    glyph::vocabulary::Vocabulary,
    render::DotSurface,
    runtime::host::{FrameHandle, Host, ListenerHandle, TimerHandle},
    theme::source::{Subscription, ThemeSource},
};

struct Mounted<S> {
    engine: DotMatrixEngine,
    surface: Option<S>,
}

/// Everything registered with the host, released on unmount.
#[derive(Default)]
struct Wiring {
    frame: Option<FrameHandle>,
    warm_up: Option<TimerHandle>,
    regenerate: Option<TimerHandle>,
    resize: Option<ListenerHandle>,
    visibility: Option<ListenerHandle>,
    theme: Option<Subscription>,
}

type Shared<S> = Rc<RefCell<Mounted<S>>>;

/// A dot-matrix display attached to a [`Host`].
///
/// Mounting wires the engine to the host: theme watcher, resize and
/// visibility listeners, the warm-up timeout that starts the periodic word
/// regeneration and, when a surface is given, the animation-frame loop.
/// After warm-up, a resize regenerates words at once and restarts the
/// regeneration interval.
/// Dropping the display (or calling [`DotMatrixDisplay::unmount`]) releases
/// all of it.
pub struct DotMatrixDisplay<S: DotSurface + 'static> {
    host: Host,
    state: Shared<S>,
    wiring: Rc<RefCell<Wiring>>,
    mounted: bool,
}

impl<S: DotSurface + 'static> DotMatrixDisplay<S> {
    #[tracing::instrument(level = "debug", skip_all, fields(width = host.viewport().width, height = host.viewport().height))]
    pub fn mount(
        host: &Host,
        config: DisplayConfig,
        vocab: Vocabulary,
        mut surface: Option<S>,
    ) -> DotMatrixResult<Self> {
        let theme_attr = host.theme_attribute();
        let viewport = host.viewport();
        let warm_up_ms = config.warm_up_ms as f64;
        let regenerate_ms = config.regenerate_interval_ms as f64;

        let mut engine = DotMatrixEngine::new(config, vocab, theme_attr.current(), viewport)?;
        engine.set_visible(!host.is_hidden());
        if let Some(s) = surface.as_mut() {
            s.resize(viewport)?;
        }
        let has_surface = surface.is_some();

        let state: Shared<S> = Rc::new(RefCell::new(Mounted { engine, surface }));
        let wiring = Rc::new(RefCell::new(Wiring::default()));

        let weak = Rc::downgrade(&state);
        let theme = theme_attr.subscribe(Box::new(move |theme| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().engine.set_theme(theme);
            }
        }));

        let resize = {
            let weak = Rc::downgrade(&state);
            let weak_wiring = Rc::downgrade(&wiring);
            let listener_host = host.clone();
            host.add_resize_listener(move |viewport| {
                let Some(state) = weak.upgrade() else { return };
                let regenerated = {
                    let mut guard = state.borrow_mut();
                    let Mounted { engine, surface } = &mut *guard;
                    let regenerate = engine.set_viewport(viewport) && engine.is_warmed_up();
                    if let Some(surface) = surface.as_mut()
                        && let Err(err) = surface.resize(viewport)
                    {
                        tracing::warn!(%err, "surface resize failed");
                    }
                    if regenerate {
                        engine.regenerate();
                    }
                    regenerate
                };
                if regenerated && let Some(wiring) = weak_wiring.upgrade() {
                    arm_regeneration(&listener_host, &state, &wiring, regenerate_ms);
                }
            })
        };

        let weak = Rc::downgrade(&state);
        let visibility = host.add_visibility_listener(move |hidden| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().engine.set_visible(!hidden);
            }
        });

        let warm_up = {
            let weak = Rc::downgrade(&state);
            let weak_wiring = Rc::downgrade(&wiring);
            let timer_host = host.clone();
            host.set_timeout(warm_up_ms, move || {
                let (Some(state), Some(wiring)) = (weak.upgrade(), weak_wiring.upgrade()) else {
                    return;
                };
                {
                    let mut guard = state.borrow_mut();
                    guard.engine.end_warm_up();
                    guard.engine.regenerate();
                }
                tracing::debug!("warm-up finished");

                wiring.borrow_mut().warm_up = None;
                arm_regeneration(&timer_host, &state, &wiring, regenerate_ms);
            })
        };

        {
            let mut w = wiring.borrow_mut();
            w.theme = Some(theme);
            w.resize = Some(resize);
            w.visibility = Some(visibility);
            w.warm_up = Some(warm_up);
        }

        if has_surface {
            schedule_frame(host, Rc::downgrade(&state), Rc::downgrade(&wiring));
        } else {
            tracing::debug!("no drawing surface, frame loop not started");
        }

        Ok(Self {
            host: host.clone(),
            state,
            wiring,
            mounted: true,
        })
    }

    /// Release every host registration. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        let wiring = std::mem::take(&mut *self.wiring.borrow_mut());
        if let Some(frame) = wiring.frame {
            self.host.cancel_animation_frame(frame);
        }
        for timer in [wiring.warm_up, wiring.regenerate].into_iter().flatten() {
            self.host.clear_timer(timer);
        }
        if let Some(resize) = wiring.resize {
            self.host.remove_resize_listener(resize);
        }
        if let Some(visibility) = wiring.visibility {
            self.host.remove_visibility_listener(visibility);
        }
        drop(wiring.theme);
        tracing::debug!("display unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Read access to the engine and the surface.
    pub fn inspect<R>(&self, f: impl FnOnce(&DotMatrixEngine, Option<&S>) -> R) -> R {
        let guard = self.state.borrow();
        f(&guard.engine, guard.surface.as_ref())
    }
}

impl<S: DotSurface + 'static> Drop for DotMatrixDisplay<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// (Re)start the periodic word regeneration, replacing any running interval.
fn arm_regeneration<S: DotSurface + 'static>(
    host: &Host,
    state: &Shared<S>,
    wiring: &Rc<RefCell<Wiring>>,
    every_ms: f64,
) {
    let weak = Rc::downgrade(state);
    let interval = host.set_interval(every_ms, move || {
        if let Some(state) = weak.upgrade() {
            state.borrow_mut().engine.regenerate();
        }
    });
    if let Some(previous) = wiring.borrow_mut().regenerate.replace(interval) {
        host.clear_timer(previous);
    }
}

/// Request the next frame; the callback re-requests before doing its work so
/// the loop keeps running through hidden and throttled frames.
fn schedule_frame<S: DotSurface + 'static>(
    host: &Host,
    state: Weak<RefCell<Mounted<S>>>,
    wiring: Weak<RefCell<Wiring>>,
) {
    let Some(live_wiring) = wiring.upgrade() else {
        return;
    };
    let next_host = host.clone();
    let next_state = state.clone();
    let next_wiring = wiring.clone();
    let handle = host.request_animation_frame(move |now_ms| {
        let Some(state) = next_state.upgrade() else {
            return;
        };
        schedule_frame(&next_host, next_state, next_wiring);

        let mut guard = state.borrow_mut();
        let Mounted { engine, surface } = &mut *guard;
        engine.on_animation_frame(
            now_ms,
            surface.as_mut().map(|s| s as &mut dyn DotSurface),
        );
    });
    live_wiring.borrow_mut().frame = Some(handle);
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/mount.rs"]
mod tests;
