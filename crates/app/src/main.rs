use anyhow::Result;
use chrono::Utc;
use domain::models::{AuthRole, TransactionForm};
use domain::sample_data::{self, DASHBOARD_EVENT_ID};
use domain::services::{self, AttendeeRoster, DateWindow, TicketSelection};
use hegira_app::check_in_desk::CheckInDesk;
use hegira_app::config::Config;
use hegira_app::controller::AppController;
use hegira_app::logging::init_logging;
use hegira_app::shell::AppShell;
use shared::format::format_rupiah;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting Hegira v{}", env!("CARGO_PKG_VERSION"));

    let scan_delay = config.scan_delay();
    let mut shell = AppShell::new(AppController::with_config(config));

    // Visitor buys a Daily Pass with a coupon after signing in from checkout.
    shell.dispatch(|c| c.open_event("jakarta-culinary-expo-2025")).await?;
    shell.settle().await;
    shell
        .dispatch(|c| c.start_checkout(&[TicketSelection::new("daily-pass-jce", 2)]))
        .await?;
    shell.settle().await;

    let today = Utc::now().date_naive();
    let applied = shell
        .dispatch(|c| c.apply_coupon("flashjce", today).map(|checkout| checkout.total_price))
        .await;
    match applied {
        Ok(total) => info!(total = %format_rupiah(total), "Coupon applied"),
        Err(e) => info!(reason = %e, "Coupon not applied"),
    }

    shell
        .dispatch(|c| c.request_checkout_login(Some(AuthRole::EventVisitor)))
        .await;
    shell.dispatch(|c| c.login_success(None)).await?;
    shell.settle().await;

    shell
        .dispatch(|c| -> Result<()> {
            let full_name = c
                .buyer_prefill()
                .map(|prefill| prefill.full_name)
                .unwrap_or_else(|| "Pengunjung Hegira".to_string());
            let checkout = c
                .checkout()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("checkout missing after login"))?;
            let form = TransactionForm {
                full_name,
                email: "pengunjung@hegira.com".to_string(),
                phone_number: "081234567890".to_string(),
                gender: None,
                date_of_birth: None,
                additional_ticket_holders: Vec::new(),
            };
            c.process_payment(form, &checkout)?;
            Ok(())
        })
        .await?;
    shell.settle().await;
    shell.dispatch(|c| c.complete_payment()).await?;
    shell.settle().await;

    {
        let controller = shell.lock().await;
        if let Some(transaction) = controller.transaction() {
            info!(
                transaction_id = %transaction.transaction_id,
                order_id = %transaction.order_id,
                path = %controller.current_path(),
                "Payment completed"
            );
        }
    }

    // Creator dashboard reports for the sample event.
    let orders = sample_data::sample_orders();
    let sales = services::ticket_sales_report(&orders, DASHBOARD_EVENT_ID, None);
    info!(total = %format_rupiah(sales.total_revenue), "Ticket sales report");
    println!("{}", sales.to_csv());

    let usage = services::coupon_usage_report(&orders, DASHBOARD_EVENT_ID, DateWindow::default(), None);
    println!("{}", services::coupon_usage_csv(&usage));

    // Gate check-in.
    let mut desk = CheckInDesk::new(AttendeeRoster::new(sample_data::sample_attendees()), scan_delay);
    let outcome = desk.scan("hgr-jce-0001").await?;
    info!(outcome = ?outcome, "Scan finished");
    let outcome = desk.manual_entry("HGR-JCE-0001").await;
    info!(outcome = ?outcome, "Manual entry");

    Ok(())
}
