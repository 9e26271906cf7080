//! Page routing, guards and view-level runtime intents

mod common;

use common::{Harness, HostEvent};
use runpad::auth::AuthContext;
use runpad::responsive::DeviceProfile;
use runpad::routes::{anonymous_only, protect, resolve_page, Guarded, Route};

fn alice() -> AuthContext {
    AuthContext::authenticated("token-123", Some("alice".to_string()))
}

// =============================================================================
// Guards
// =============================================================================

#[test]
fn test_guards_are_complementary() {
    for auth in [AuthContext::anonymous(), alice()] {
        let protected = protect((), &auth);
        let public = anonymous_only((), &auth);
        assert_ne!(
            matches!(protected, Guarded::Render(_)),
            matches!(public, Guarded::Render(_))
        );
    }
}

#[test]
fn test_resolve_page_applies_page_guards() {
    let anon = AuthContext::anonymous();
    assert_eq!(
        resolve_page("/accounts", &anon),
        Guarded::Redirect(Route::Login)
    );
    assert_eq!(
        resolve_page("/accounts", &alice()),
        Guarded::Render(Route::Accounts)
    );
    assert_eq!(
        resolve_page("/login", &alice()),
        Guarded::Redirect(Route::Home)
    );
    assert_eq!(
        resolve_page("/register", &anon),
        Guarded::Render(Route::Register)
    );
}

#[test]
fn test_editor_and_home_are_public() {
    for auth in [AuthContext::anonymous(), alice()] {
        assert_eq!(resolve_page("/", &auth), Guarded::Render(Route::Home));
        assert_eq!(
            resolve_page("/julia", &auth),
            Guarded::Render(Route::Editor("julia".to_string()))
        );
        assert_eq!(
            resolve_page("/nope", &auth),
            Guarded::Render(Route::NotFound)
        );
    }
}

#[test]
fn test_every_language_has_an_editor_route() {
    for lang in runpad::languages::LANGUAGES {
        assert_eq!(
            Route::resolve(&lang.path()),
            Route::Editor(lang.id.to_string())
        );
    }
}

// =============================================================================
// Runtime navigation
// =============================================================================

#[tokio::test]
async fn test_navigate_to_protected_page_redirects() {
    let mut h = Harness::new("python", "");

    let shown = h.runtime.navigate("/accounts");

    assert_eq!(shown, Route::Login);
    assert_eq!(h.runtime.route(), &Route::Login);
    assert_eq!(h.host.navigations(), vec![Route::Login]);
}

#[tokio::test]
async fn test_navigate_to_editor_opens_language_session() {
    let mut h = Harness::new("python", "py code");

    h.runtime.navigate("/ruby");

    assert_eq!(h.runtime.model().language(), "ruby");
    assert_eq!(h.code(), runpad::languages::default_sample("ruby"));

    h.runtime.navigate("/python");
    assert_eq!(h.code(), "py code");
}

#[tokio::test]
async fn test_signed_in_user_is_sent_home_from_login() {
    let mut h = Harness::signed_in("python", "");
    assert_eq!(h.runtime.navigate("/login"), Route::Home);
    assert_eq!(h.runtime.navigate("/accounts"), Route::Accounts);
}

#[tokio::test]
async fn test_unknown_path_shows_not_found() {
    let mut h = Harness::new("python", "");
    assert_eq!(h.runtime.navigate("/does/not/exist"), Route::NotFound);
    assert_eq!(h.runtime.model().language(), "python");
}

#[tokio::test]
async fn test_language_switch_keeps_sessions_apart() {
    let mut h = Harness::new("python", "a = 1");
    h.services.set_execute(Ok(common::output("py out")));
    h.runtime.run();
    h.runtime.settle().await;

    h.runtime.open_language("go");
    assert_eq!(h.output(), "");
    h.runtime.set_code("package main");

    h.runtime.open_language("python");
    assert_eq!(h.code(), "a = 1");
    assert_eq!(h.output(), "py out");
    assert_eq!(h.runtime.route(), &Route::Editor("python".to_string()));
}

#[tokio::test]
async fn test_run_output_for_previous_language_is_dropped() {
    let mut h = Harness::new("python", "print(1)");
    h.services.set_latency(std::time::Duration::from_millis(10));
    h.services.set_execute(Ok(common::output("1")));

    h.runtime.run();
    h.runtime.open_language("ruby");
    h.runtime.settle().await;

    assert_eq!(h.output(), "");
    assert!(!h
        .runtime
        .model()
        .actions
        .is_pending(runpad::model::ActionKind::Run));
}

// =============================================================================
// Viewport and notifications
// =============================================================================

#[tokio::test]
async fn test_resize_reclassifies_device() {
    let mut h = Harness::new("python", "");
    assert_eq!(h.runtime.model().ui.device, DeviceProfile::Desktop);
    assert_eq!(h.runtime.model().presentation().font_size, 16);
    assert!(h.runtime.model().presentation().folding);

    h.runtime.resize(1024);
    assert_eq!(h.runtime.model().ui.device, DeviceProfile::Tablet);
    assert_eq!(h.runtime.model().presentation().font_size, 14);

    h.runtime.resize(768);
    assert_eq!(h.runtime.model().ui.device, DeviceProfile::Mobile);
    assert_eq!(h.runtime.model().presentation().font_size, 12);
    assert!(!h.runtime.model().presentation().folding);
}

#[tokio::test]
async fn test_dismiss_notification() {
    let mut h = Harness::signed_in("python", "x");
    h.services.set_refactor(Err(common::transport_error()));
    h.runtime.refactor();
    h.runtime.settle().await;
    assert!(h.runtime.model().ui.notification.is_some());
    assert!(matches!(h.host.events().last(), Some(HostEvent::Notify(_))));

    h.runtime.dismiss_notification();
    assert!(h.runtime.model().ui.notification.is_none());
}
