// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use ludex_app::{
    AppCommand, AppEvent, AppSettings, AppState, CardId, CatalogItem, ExternalPage, NavItemId,
    NavSide, Page, PillId, PillKind, RecoveryCompletion, RecoveryField, RecoveryStep,
    StorefrontLayout, Viewport,
};
use ludex_testkit::{GameFaker, RecordingRecovery, boundary_price_catalog, storefront};
use std::time::{Duration, Instant};

fn select(state: &mut AppState, kind: PillKind, index: usize) {
    state.dispatch(AppCommand::SelectPill {
        kind,
        pill: PillId::new(index),
    });
}

fn visible(state: &AppState) -> Vec<usize> {
    state
        .catalog()
        .visible_ids()
        .into_iter()
        .map(CardId::get)
        .collect()
}

fn fill(state: &mut AppState, field: RecoveryField, value: &str) {
    state.dispatch(AppCommand::EditRecoveryField {
        field,
        value: value.to_owned(),
    });
}

#[test]
fn price_buckets_respect_boundaries() {
    let mut state = storefront(boundary_price_catalog(), 1200);

    select(&mut state, PillKind::Price, 1);
    assert_eq!(visible(&state), vec![0, 5], "free includes unparseable prices");

    select(&mut state, PillKind::Price, 2);
    assert_eq!(visible(&state), vec![1]);

    select(&mut state, PillKind::Price, 3);
    assert_eq!(visible(&state), vec![1, 2, 3]);

    select(&mut state, PillKind::Price, 0);
    assert_eq!(visible(&state).len(), 6);
}

#[test]
fn filters_combine_with_and() {
    let mut state = storefront(boundary_price_catalog(), 1200);
    select(&mut state, PillKind::Category, 3);
    select(&mut state, PillKind::Price, 3);
    assert_eq!(state.filter().category(), "Strategy");
    assert_eq!(visible(&state), vec![3]);

    let start = Instant::now();
    state.dispatch(AppCommand::SearchInput {
        text: "exactly".to_owned(),
        at: start,
    });
    state.dispatch(AppCommand::Tick(start + Duration::from_secs(1)));
    assert!(visible(&state).is_empty());

    select(&mut state, PillKind::Price, 0);
    assert_eq!(visible(&state), vec![4]);
}

#[test]
fn category_pill_keeps_cards_with_padded_categories() {
    let mut state = storefront(
        vec![
            CatalogItem::from_attributes(Some("Blade Rush"), Some("Action "), Some("4.99")),
            CatalogItem::from_attributes(Some("Pocket Golf"), Some("Sports"), Some("0")),
        ],
        1200,
    );
    let pill = state.pills(PillKind::Category).pills()[1].clone();
    assert_eq!(pill.value.as_deref(), Some("Action"));

    select(&mut state, PillKind::Category, 1);
    assert_eq!(visible(&state), vec![0]);
}

#[test]
fn render_pass_is_idempotent() {
    let mut faker = GameFaker::new(11);
    let mut state = storefront(faker.games(40), 1200);
    select(&mut state, PillKind::Price, 2);

    let events = state.dispatch(AppCommand::RenderFilters);
    let Some(AppEvent::FiltersRendered { changed, visible }) = events.first() else {
        panic!("expected a render event, got {events:?}");
    };
    assert_eq!(*changed, 0);
    assert_eq!(*visible, state.catalog().visible_count());
}

#[test]
fn every_visible_card_matches_current_filters() {
    let mut faker = GameFaker::new(5);
    let mut state = storefront(faker.games(60), 1200);
    let categories = state.pills(PillKind::Category).len();
    for round in 0..20 {
        select(&mut state, PillKind::Category, faker.int_n(categories));
        select(&mut state, PillKind::Price, faker.int_n(4));
        for (index, item) in state.catalog().items().iter().enumerate() {
            let shown = state
                .catalog()
                .visibility(CardId::new(index))
                .is_some_and(|visibility| visibility.is_shown());
            assert_eq!(
                shown,
                state.filter().matches(item),
                "round {round}: card {index} ({})",
                item.title()
            );
        }
    }
}

#[test]
fn recovery_happy_path() {
    let mut state = storefront(Vec::new(), 1200);
    let mut service = RecordingRecovery::default();

    let events = state.dispatch(AppCommand::OpenRecovery);
    assert_eq!(events[0], AppEvent::PageChanged(Page::Recovery));
    assert_eq!(state.recovery.step(), RecoveryStep::RequestCode);

    fill(&mut state, RecoveryField::Email, "  player@example.com ");
    let events = state.submit_recovery(&mut service);
    assert_eq!(
        events,
        vec![
            AppEvent::NoticeShown("verification code sent to player@example.com".to_owned()),
            AppEvent::RecoveryStepChanged(RecoveryStep::ResetPassword),
            AppEvent::ScrollToTop,
        ]
    );
    assert_eq!(service.codes_sent_to, vec!["player@example.com".to_owned()]);
    state.dispatch(AppCommand::DismissNotice);

    fill(&mut state, RecoveryField::Code, "482913");
    fill(&mut state, RecoveryField::NewPassword, "hunter22");
    fill(&mut state, RecoveryField::ConfirmPassword, "hunter22");
    let events = state.submit_recovery(&mut service);
    assert!(matches!(events[0], AppEvent::NoticeShown(_)));
    assert!(events.contains(&AppEvent::RecoveryStepChanged(RecoveryStep::RequestCode)));
    assert!(!events.contains(&AppEvent::OpenExternal(ExternalPage::SignIn)));
    assert_eq!(
        service.resets,
        vec![("482913".to_owned(), "hunter22".to_owned())]
    );
}

#[test]
fn recovery_validation_keeps_step_and_shows_notice() {
    let mut state = storefront(Vec::new(), 1200);
    let mut service = RecordingRecovery::default();
    state.dispatch(AppCommand::OpenRecovery);

    fill(&mut state, RecoveryField::Email, "not-an-email");
    let events = state.submit_recovery(&mut service);
    assert_eq!(
        events,
        vec![AppEvent::NoticeShown(
            "enter a valid email address (for example user@example.com) and retry".to_owned()
        )]
    );
    assert_eq!(state.recovery.step(), RecoveryStep::RequestCode);
    assert!(service.codes_sent_to.is_empty());

    state.dispatch(AppCommand::ShowRecoveryStep(RecoveryStep::ResetPassword));
    fill(&mut state, RecoveryField::Code, "12");
    fill(&mut state, RecoveryField::NewPassword, "abc");
    fill(&mut state, RecoveryField::ConfirmPassword, "xyz");
    state.submit_recovery(&mut service);
    assert_eq!(state.notice(), Some("enter a valid code (4-6 digits) and retry"));
    assert_eq!(state.recovery.step(), RecoveryStep::ResetPassword);

    fill(&mut state, RecoveryField::Code, "1234");
    state.submit_recovery(&mut service);
    assert_eq!(state.notice(), Some("password must be at least 6 characters"));

    fill(&mut state, RecoveryField::NewPassword, "abcdef");
    state.submit_recovery(&mut service);
    assert_eq!(
        state.notice(),
        Some("passwords do not match -- retype the confirmation and retry")
    );
    assert!(service.resets.is_empty());
}

#[test]
fn recovery_service_failure_is_reported() {
    let mut state = storefront(Vec::new(), 1200);
    let mut service = RecordingRecovery {
        fail_send: true,
        ..RecordingRecovery::default()
    };
    state.dispatch(AppCommand::OpenRecovery);
    fill(&mut state, RecoveryField::Email, "player@example.com");
    state.submit_recovery(&mut service);
    assert!(
        state
            .notice()
            .is_some_and(|notice| notice.contains("mail service unavailable"))
    );
    assert_eq!(state.recovery.step(), RecoveryStep::RequestCode);
}

#[test]
fn reset_failure_stays_on_step_two() {
    let mut state = storefront(Vec::new(), 1200);
    let mut service = RecordingRecovery {
        fail_reset: true,
        ..RecordingRecovery::default()
    };
    state.dispatch(AppCommand::OpenRecovery);
    state.dispatch(AppCommand::ShowRecoveryStep(RecoveryStep::ResetPassword));
    fill(&mut state, RecoveryField::Code, "2468");
    fill(&mut state, RecoveryField::NewPassword, "hunter22");
    fill(&mut state, RecoveryField::ConfirmPassword, "hunter22");

    let events = state.submit_recovery(&mut service);
    assert_eq!(events.len(), 1);
    assert!(
        state
            .notice()
            .is_some_and(|notice| notice.contains("reset code expired"))
    );
    assert!(matches!(events[0], AppEvent::NoticeShown(_)));
    assert_eq!(state.recovery.step(), RecoveryStep::ResetPassword);
    assert!(service.resets.is_empty());
}

#[test]
fn sign_in_completion_requests_external_page() {
    let settings = AppSettings {
        recovery_completion: RecoveryCompletion::SignIn,
        ..AppSettings::default()
    };
    let mut state = AppState::new(
        StorefrontLayout::standard(Vec::new()),
        settings,
        Viewport::new(1200),
    );
    let mut service = RecordingRecovery::default();
    state.dispatch(AppCommand::OpenRecovery);
    state.dispatch(AppCommand::ShowRecoveryStep(RecoveryStep::ResetPassword));
    fill(&mut state, RecoveryField::Code, "9876");
    fill(&mut state, RecoveryField::NewPassword, "secret1");
    fill(&mut state, RecoveryField::ConfirmPassword, "secret1");

    let events = state.submit_recovery(&mut service);
    assert_eq!(
        events.last(),
        Some(&AppEvent::OpenExternal(ExternalPage::SignIn))
    );
}

#[test]
fn nav_sync_across_both_lists() {
    let mut state = storefront(Vec::new(), 1200);
    state.dispatch(AppCommand::SelectNav {
        side: NavSide::Secondary,
        item: NavItemId::new(2),
    });
    assert_eq!(state.nav().primary().active_section(), Some("wishlist"));
    assert_eq!(state.nav().primary().items()[2].pressed, Some(true));

    state.dispatch(AppCommand::SelectNav {
        side: NavSide::Primary,
        item: NavItemId::new(4),
    });
    assert_eq!(state.nav().primary().active(), Some(NavItemId::new(4)));
    assert_eq!(state.nav().secondary().active(), None);
}

#[test]
fn debug_snapshot_serializes() -> Result<()> {
    let mut state = storefront(boundary_price_catalog(), 1200);
    state.dispatch(AppCommand::OpenSidebar);
    select(&mut state, PillKind::Price, 2);

    let value = serde_json::to_value(state.debug_snapshot())?;
    assert_eq!(value["page"], "browse");
    assert_eq!(value["filter"]["category"], "All Games");
    assert_eq!(value["filter"]["price"], "lt5");
    assert_eq!(value["sidebar"]["open"], true);
    assert_eq!(value["visible_cards"], serde_json::json!([1]));
    assert_eq!(value["recovery_step"], "request_code");
    Ok(())
}
