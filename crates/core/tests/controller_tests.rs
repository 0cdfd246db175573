// ═══════════════════════════════════════════════════════════════════
// Controller Tests: form and list lifecycles, concurrency, dashboard,
// FinanceDashboard facade
// ═══════════════════════════════════════════════════════════════════

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use finance_dashboard_core::api::transport::Method;
use finance_dashboard_core::controllers::confirm::FixedAnswer;
use finance_dashboard_core::controllers::dashboard::DASHBOARD_LOAD_ERROR;
use finance_dashboard_core::controllers::form::{FormController, FormMode, SubmitOutcome};
use finance_dashboard_core::controllers::list::DeleteOutcome;
use finance_dashboard_core::controllers::view::ExportOutcome;
use finance_dashboard_core::errors::CoreError;
use finance_dashboard_core::models::entity::{Entity, EntityId, Resource};
use finance_dashboard_core::models::investment::Investment;
use finance_dashboard_core::models::liability::Liability;
use finance_dashboard_core::models::settings::ApiSettings;
use finance_dashboard_core::{FinanceDashboard, RefreshOutcome};

fn app(backend: &MockBackend) -> FinanceDashboard {
    FinanceDashboard::with_transport(backend.boxed(), Arc::new(FixedAnswer(true)))
}

fn app_with_confirm(backend: &MockBackend, confirm: Arc<ScriptedConfirm>) -> FinanceDashboard {
    FinanceDashboard::with_transport(backend.boxed(), confirm)
}

fn fill_investment(form: &FormController<Investment>, amount: &str) {
    form.set_field("investmentType", "Fixed Deposit");
    form.set_field("providerBroker", "HDFC Bank");
    form.set_field("investmentAmount", amount);
    form.set_field("currentAmount", "100000");
    form.set_field("purchasedDate", "2025-01-01");
}

fn fill_liability(form: &FormController<Liability>) {
    form.set_field("name", "Car loan");
    form.set_field("liabilityType", "Car Loan");
    form.set_field("amount", "450000");
}

// ═══════════════════════════════════════════════════════════════════
// Form
// ═══════════════════════════════════════════════════════════════════

mod form {
    use super::*;

    #[tokio::test]
    async fn unchanged_edit_puts_the_original_payload() {
        let backend = MockBackend::new();
        let id = backend.seed("investments", investment_json("Stocks", 1000.0, 1200.0));
        let view = app(&backend).investments();
        view.mount().await;

        let original = view.list().items()[0].clone();
        assert!(view.edit(&EntityId::from(id)));
        assert_eq!(view.form().mode(), FormMode::Edit(EntityId::from(id)));

        let outcome = view.submit().await;
        assert!(outcome.is_saved());

        let mutations = backend.mutating_requests();
        assert_eq!(mutations.len(), 1);
        assert_eq!(mutations[0].method, Method::Put);
        assert_eq!(mutations[0].path, format!("/investments/{id}"));
        assert_eq!(
            mutations[0].body,
            Some(serde_json::to_value(original.to_payload()).unwrap())
        );
        assert_eq!(view.list().items(), vec![original]);
    }

    #[tokio::test]
    async fn non_numeric_amount_is_rejected_without_a_request() {
        let backend = MockBackend::new();
        let view = app(&backend).investments();
        view.form().begin_create();
        fill_investment(view.form(), "lots");

        let outcome = view.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Rejected(ref m) if m.contains("Investment amount")));
        assert!(backend.mutating_requests().is_empty());

        let state = view.form().snapshot();
        assert!(state.visible);
        assert_eq!(state.fields.get("investmentAmount"), "lots");
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn parse_checks_fields_without_a_request() {
        let backend = MockBackend::new();
        let view = app(&backend).investments();
        view.form().begin_create();

        fill_investment(view.form(), "250000");
        let payload = view.form().parse().unwrap();
        assert_eq!(payload.investment_amount, 250000.0);
        assert_eq!(payload.provider_broker, "HDFC Bank");

        view.form().set_field("investmentAmount", "lots");
        let err = view.form().parse().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(view.form().snapshot().error, None);
        assert_eq!(backend.request_count(), 0);
    }

    #[tokio::test]
    async fn created_item_appears_once_after_refresh() {
        let backend = MockBackend::new();
        backend.seed("investments", investment_json("Gold", 5000.0, 5600.0));
        let view = app(&backend).investments();
        view.mount().await;

        view.form().begin_create();
        fill_investment(view.form(), "100000");
        let created = match view.submit().await {
            SubmitOutcome::Saved(inv) => inv,
            other => panic!("unexpected {other:?}"),
        };

        let items = view.list().items();
        assert_eq!(items.len(), 2);
        assert_eq!(items.iter().filter(|i| i.id == created.id).count(), 1);
        assert_eq!(created.investment_type, "Fixed Deposit");

        let form = view.form().snapshot();
        assert!(!form.visible);
        assert_eq!(form.mode, FormMode::Create);
        assert_eq!(form.fields, Investment::default_fields());
    }

    #[tokio::test]
    async fn failed_save_keeps_form_open_with_server_message() {
        let backend = MockBackend::new();
        backend.fail(Method::Post, "/liabilities", 500, "Database unavailable");
        let view = app(&backend).liabilities();
        view.form().begin_create();
        fill_liability(view.form());

        let outcome = view.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed("Database unavailable".into()));

        let state = view.form().snapshot();
        assert!(state.visible);
        assert_eq!(state.fields.get("name"), "Car loan");
        assert_eq!(state.error.as_deref(), Some("Database unavailable"));
        assert!(view.list().items().is_empty());
    }

    #[tokio::test]
    async fn failed_save_without_message_uses_generic_text() {
        let backend = MockBackend::new();
        backend.fail(Method::Post, "/liabilities", 500, "");
        let view = app(&backend).liabilities();
        view.form().begin_create();
        fill_liability(view.form());

        let outcome = view.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed("Failed to save liability".into()));
    }

    #[tokio::test]
    async fn framework_error_body_without_message_uses_generic_text() {
        let backend = MockBackend::new();
        backend.fail_raw(
            Method::Post,
            "/investments",
            400,
            r#"{"timestamp":"2025-01-01T00:00:00","status":400,"error":"Bad Request","message":"","path":"/api/investments"}"#,
        );
        let view = app(&backend).investments();
        view.form().begin_create();
        fill_investment(view.form(), "100000");

        let outcome = view.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed("Failed to save investment".into()));
        assert_eq!(
            view.form().snapshot().error.as_deref(),
            Some("Failed to save investment")
        );
    }

    #[tokio::test]
    async fn proxy_html_page_is_not_shown_in_form() {
        let backend = MockBackend::new();
        backend.fail_raw(
            Method::Post,
            "/investments",
            502,
            "<html>\r\n<head><title>502 Bad Gateway</title></head>\r\n<body>\r\n<center><h1>502 Bad Gateway</h1></center>\r\n<hr><center>nginx/1.25.3</center>\r\n</body>\r\n</html>",
        );
        let view = app(&backend).investments();
        view.form().begin_create();
        fill_investment(view.form(), "100000");

        let outcome = view.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed("Failed to save investment".into()));
        assert!(view.form().is_visible());
    }

    #[tokio::test]
    async fn offline_save_uses_generic_text() {
        let backend = MockBackend::new();
        backend.set_offline(true);
        let view = app(&backend).liabilities();
        view.form().begin_create();
        fill_liability(view.form());

        let outcome = view.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed("Failed to save liability".into()));
        assert!(view.form().is_visible());
    }

    #[tokio::test]
    async fn toggle_and_cancel() {
        let backend = MockBackend::new();
        let view = app(&backend).investments();
        let form = view.form();
        assert!(!form.is_visible());

        form.toggle();
        assert!(form.is_visible());
        assert_eq!(form.snapshot().title(Resource::Investments), "New Investment");

        form.toggle();
        assert!(!form.is_visible());

        form.toggle();
        form.set_field("providerBroker", "Zerodha");
        form.cancel();
        let state = form.snapshot();
        assert!(!state.visible);
        assert_eq!(state.fields, Investment::default_fields());
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn edit_of_unknown_id_does_nothing() {
        let backend = MockBackend::new();
        let view = app(&backend).assets();
        view.mount().await;
        assert!(!view.edit(&EntityId::from(42)));
        assert!(!view.form().is_visible());
        let err = view.list().item(&EntityId::from(42)).unwrap_err();
        assert_eq!(err.to_string(), "Entity not found: asset 42");
    }

    #[tokio::test]
    async fn edit_form_title() {
        let backend = MockBackend::new();
        let id = backend.seed("liabilities", liability_json("Loan", "Mortgage", 2_000_000.0));
        let view = app(&backend).liabilities();
        view.mount().await;
        view.edit(&EntityId::from(id));
        let state = view.form().snapshot();
        assert_eq!(state.title(Resource::Liabilities), "Edit Liability");
        assert_eq!(state.fields.get("amount"), "2000000");
    }
}

// ═══════════════════════════════════════════════════════════════════
// List
// ═══════════════════════════════════════════════════════════════════

mod list {
    use super::*;

    #[tokio::test]
    async fn mount_loads_and_clears_loading() {
        let backend = MockBackend::new();
        backend.seed("assets", asset_json("Flat", "Real Estate", 7_500_000.0));
        let view = app(&backend).assets();
        assert!(view.list().is_loading());

        assert_eq!(view.mount().await, RefreshOutcome::Loaded);
        let state = view.list().snapshot();
        assert!(!state.loading);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_item_and_reloads() {
        let backend = MockBackend::new();
        let gone = backend.seed("assets", asset_json("Car", "Vehicle", 800_000.0));
        let keep = backend.seed("assets", asset_json("Flat", "Real Estate", 7_500_000.0));
        let confirm = ScriptedConfirm::new(true);
        let view = app_with_confirm(&backend, confirm.clone()).assets();
        view.mount().await;

        let outcome = view.delete(&EntityId::from(gone)).await;
        assert_eq!(outcome, DeleteOutcome::Deleted(RefreshOutcome::Loaded));

        let ids: Vec<EntityId> = view.list().items().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![EntityId::from(keep)]);
        assert_eq!(
            confirm.prompts(),
            vec!["Are you sure you want to delete this asset?".to_string()]
        );
    }

    #[tokio::test]
    async fn deleting_only_item_leaves_empty_view() {
        let backend = MockBackend::new();
        let id = backend.seed("insurances", insurance_json("P-1", "Health", 12_000.0, 500_000.0));
        let view = app(&backend).insurances();
        view.mount().await;

        view.delete(&EntityId::from(id)).await;
        let state = view.list().snapshot();
        assert!(state.is_empty_view());
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let backend = MockBackend::new();
        let id = backend.seed("insurances", insurance_json("P-1", "Term", 24_000.0, 1e7));
        let confirm = ScriptedConfirm::new(false);
        let view = app_with_confirm(&backend, confirm.clone()).insurances();
        view.mount().await;

        let outcome = view.delete(&EntityId::from(id)).await;
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert!(backend.mutating_requests().is_empty());
        assert_eq!(view.list().items().len(), 1);
        assert_eq!(
            confirm.prompts(),
            vec!["Are you sure you want to delete this insurance policy?".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_delete_keeps_items() {
        let backend = MockBackend::new();
        let id = backend.seed("assets", asset_json("Car", "Vehicle", 800_000.0));
        backend.fail(Method::Delete, &format!("/assets/{id}"), 500, "locked");
        let view = app(&backend).assets();
        view.mount().await;

        let outcome = view.delete(&EntityId::from(id)).await;
        assert_eq!(outcome, DeleteOutcome::Failed("Failed to delete asset".into()));
        assert_eq!(view.list().items().len(), 1);
        assert_eq!(view.list().error().as_deref(), Some("Failed to delete asset"));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_items() {
        let backend = MockBackend::new();
        backend.seed("assets", asset_json("Flat", "Real Estate", 7_500_000.0));
        let view = app(&backend).assets();
        view.mount().await;

        backend.fail(Method::Get, "/assets", 500, "boom");
        let outcome = view.list().refresh().await;
        assert_eq!(outcome, RefreshOutcome::Failed("Failed to load assets".into()));

        let state = view.list().snapshot();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error.as_deref(), Some("Failed to load assets"));
        assert!(!state.loading);
        assert!(!state.is_empty_view());

        backend.clear_failures();
        assert_eq!(view.list().refresh().await, RefreshOutcome::Loaded);
        assert_eq!(view.list().error(), None);
    }

    #[tokio::test]
    async fn newest_refresh_wins() {
        let backend = MockBackend::new();
        backend.seed("investments", investment_json("Stocks", 1000.0, 1200.0));
        let view = app(&backend).investments();

        // The first response is decided with one item, then held back.
        backend.delay_next(150);
        let (slow, fast) = tokio::join!(view.list().refresh(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            backend.seed("investments", investment_json("Gold", 5000.0, 5600.0));
            view.list().refresh().await
        });

        assert_eq!(slow, RefreshOutcome::Superseded);
        assert_eq!(fast, RefreshOutcome::Loaded);
        assert_eq!(view.list().items().len(), 2);
        assert!(!view.list().is_loading());
    }
}

// ═══════════════════════════════════════════════════════════════════
// View lifetime and export
// ═══════════════════════════════════════════════════════════════════

mod lifetime {
    use super::*;

    #[tokio::test]
    async fn closing_cancels_pending_refresh() {
        let backend = MockBackend::new();
        backend.seed("assets", asset_json("Flat", "Real Estate", 7_500_000.0));
        let view = app(&backend).assets();

        backend.delay_next(200);
        let (outcome, _) = tokio::join!(view.mount(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            view.close();
        });

        assert_eq!(outcome, RefreshOutcome::Cancelled);
        assert!(view.list().items().is_empty());
        assert!(view.scope().is_closed());
    }

    #[tokio::test]
    async fn closed_view_sends_nothing() {
        let backend = MockBackend::new();
        let id = backend.seed("assets", asset_json("Car", "Vehicle", 800_000.0));
        let view = app(&backend).assets();
        view.mount().await;
        view.close();
        let before = backend.request_count();

        assert_eq!(view.list().refresh().await, RefreshOutcome::Cancelled);
        assert_eq!(view.delete(&EntityId::from(id)).await, DeleteOutcome::Cancelled);
        assert_eq!(backend.request_count(), before);
        assert_eq!(view.list().items().len(), 1);
    }

    #[tokio::test]
    async fn closing_cancels_pending_submit() {
        let backend = MockBackend::new();
        let view = app(&backend).investments();
        view.form().begin_create();
        fill_investment(view.form(), "100000");

        backend.delay_next(200);
        let (outcome, _) = tokio::join!(view.submit(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            view.close();
        });
        assert_eq!(outcome, SubmitOutcome::Cancelled);
    }

    #[tokio::test]
    async fn export_delivers_csv() {
        let backend = MockBackend::new();
        backend.seed("liabilities", liability_json("Loan", "Mortgage", 2_000_000.0));
        let view = app(&backend).liabilities();
        let sink = MemorySink::default();

        match view.export(&sink).await {
            ExportOutcome::Exported(export) => {
                assert_eq!(export.file_name, "liabilities_export.csv");
                assert_eq!(export.data_rows(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(sink.exports.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_export_sets_list_error() {
        let backend = MockBackend::new();
        let view = app(&backend).assets();
        view.mount().await;

        let outcome = view.export(&FailingSink).await;
        assert_eq!(outcome, ExportOutcome::Failed("Failed to export assets".into()));
        assert_eq!(view.list().error().as_deref(), Some("Failed to export assets"));
    }

    #[tokio::test]
    async fn insurances_export_is_unsupported() {
        let backend = MockBackend::new();
        let view = app(&backend).insurances();
        let sink = MemorySink::default();

        let outcome = view.export(&sink).await;
        assert_eq!(outcome, ExportOutcome::Failed("Failed to export insurances".into()));
        assert_eq!(backend.request_count(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Dashboard and facade
// ═══════════════════════════════════════════════════════════════════

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn load_populates_summary_and_derived_figures() {
        let backend = MockBackend::new();
        backend.seed("assets", asset_json("Flat", "Real Estate", 1_000_000.0));
        backend.seed("investments", investment_json("Stocks", 150_000.0, 200_000.0));
        backend.seed("liabilities", liability_json("Loan", "Mortgage", 300_000.0));
        let dashboard = app(&backend).dashboard();
        assert!(dashboard.snapshot().loading);

        assert_eq!(dashboard.load().await, RefreshOutcome::Loaded);
        let state = dashboard.snapshot();
        assert!(!state.loading);
        let summary = state.summary.clone().unwrap();
        assert_eq!(summary.net_worth, 900_000.0);
        assert_eq!(summary.total_assets_with_investments, 1_200_000.0);

        let allocation = state.allocation().unwrap();
        assert_eq!(allocation.len(), 4);
        assert_eq!(allocation[0].value, 200_000.0);
        assert_eq!(allocation[3].value, 251_500.0);
        assert!(state.metrics().unwrap().roi > 0.0);
    }

    #[tokio::test]
    async fn failed_load_reports_fixed_message() {
        let backend = MockBackend::new();
        backend.fail(Method::Get, "/dashboard", 500, "down");
        let dashboard = app(&backend).dashboard();

        let outcome = dashboard.load().await;
        assert_eq!(outcome, RefreshOutcome::Failed(DASHBOARD_LOAD_ERROR.into()));
        let state = dashboard.snapshot();
        assert_eq!(state.summary, None);
        assert_eq!(state.error.as_deref(), Some("Failed to load dashboard data"));
        assert!(state.metrics().is_none());
    }

    #[tokio::test]
    async fn closed_dashboard_ignores_load() {
        let backend = MockBackend::new();
        let dashboard = app(&backend).dashboard();
        dashboard.close();
        assert_eq!(dashboard.load().await, RefreshOutcome::Cancelled);
        assert_eq!(backend.request_count(), 0);
    }

    #[test]
    fn facade_debug_names_transport() {
        let backend = MockBackend::new();
        let debug = format!("{:?}", app(&backend));
        assert!(debug.contains("mock"));
    }

    #[test]
    fn connect_rejects_relative_base_without_origin() {
        let err = FinanceDashboard::connect(&ApiSettings::production(), Arc::new(FixedAnswer(true)))
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[tokio::test]
    async fn views_are_independent() {
        let backend = MockBackend::new();
        backend.seed("assets", asset_json("Flat", "Real Estate", 1_000_000.0));
        let app = app(&backend);
        let first = app.assets();
        let second = app.assets();
        first.mount().await;
        first.close();

        assert_eq!(second.mount().await, RefreshOutcome::Loaded);
        assert_eq!(second.list().items().len(), 1);
    }
}
