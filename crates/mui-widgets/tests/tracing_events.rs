//! Structured log events emitted by the bouncer and swipe row.
//!
//! Run with: cargo test -p mui-widgets --features tracing

#![cfg(feature = "tracing")]

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use mui_core::{DetachedView, HostView, PanEvent, Size, Vector};
use mui_runtime::Subject;
use mui_widgets::{Bouncer, BouncerConfig, SwipeRow};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use web_time::Duration;

struct MessageCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for MessageCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(message) = msg.message {
            self.messages.lock().expect("capture lock").push(message);
        }
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(MessageCapture {
        messages: Arc::clone(&messages),
    });
    let result = {
        let _guard = tracing::subscriber::set_default(subscriber);
        f()
    };
    let messages = messages.lock().expect("capture lock").clone();
    (result, messages)
}

fn view() -> Rc<dyn HostView> {
    Rc::new(DetachedView::new(Size::new(320.0, 44.0)))
}

#[test]
fn release_logs_settle_decision() {
    let ((), messages) = capture(|| {
        let pan: Subject<PanEvent> = Subject::publish();
        let config = BouncerConfig::default().with_attractors([0.0, 150.0]);
        let bouncer = Bouncer::new(view(), &pan, config).expect("valid config");
        pan.emit(PanEvent::began());
        pan.emit(PanEvent::changed(Vector::new(40.0, 0.0), Vector::ZERO));
        pan.emit(PanEvent::ended(Vector::new(40.0, 0.0), Vector::ZERO));
        while bouncer.tick(Duration::from_millis(16)) {}
    });
    assert!(
        messages.iter().any(|m| m == "bouncer.settle"),
        "expected bouncer.settle, got {messages:?}"
    );
}

#[test]
fn out_of_order_pan_is_logged_and_ignored() {
    let (offset, messages) = capture(|| {
        let pan: Subject<PanEvent> = Subject::publish();
        let bouncer = Bouncer::horizontal(view(), &pan, Duration::ZERO).expect("valid config");
        pan.emit(PanEvent::changed(Vector::new(40.0, 0.0), Vector::ZERO));
        bouncer.current_offset()
    });
    assert_eq!(offset, -20.0);
    assert!(messages.iter().any(|m| m == "bouncer.pan_ignored"));
}

#[test]
fn rejected_attractor_updates_warn() {
    let ((), messages) = capture(|| {
        let pan: Subject<PanEvent> = Subject::publish();
        let bouncer = Bouncer::horizontal(view(), &pan, Duration::ZERO).expect("valid config");
        bouncer.set_attractors(Vec::new());
        bouncer.set_attractors([f64::NAN, 10.0]);
    });
    assert!(messages.iter().any(|m| m == "bouncer.attractors_empty"));
    assert!(messages.iter().any(|m| m == "bouncer.attractors_non_finite"));
    assert!(messages.iter().any(|m| m == "bouncer.resettle"));
}

#[test]
fn swipe_row_rejects_negative_width() {
    let ((), messages) = capture(|| {
        let pan: Subject<PanEvent> = Subject::publish();
        let row = SwipeRow::<u8>::new(view(), view(), &pan, 80.0, 0.0, Duration::ZERO)
            .expect("valid row");
        row.trailing_width().write(-1.0);
    });
    assert!(messages.iter().any(|m| m == "swipe_row.width_ignored"));
}
