// src/services/report_service.rs

use chrono::{Days, NaiveTime, Utc};

use crate::{
    common::error::AppError,
    db::{FinanceRepository, ReportRepository},
    models::{
        finance::{SummaryPeriod, TransactionType},
        report::{DashboardSummary, SalesChartEntry, TopProductEntry},
    },
};

#[derive(Clone)]
pub struct ReportService {
    repo: ReportRepository,
    finance_repo: FinanceRepository,
}

impl ReportService {
    pub fn new(repo: ReportRepository, finance_repo: FinanceRepository) -> Self {
        Self { repo, finance_repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let today = Utc::now().date_naive();
        let (today_start, today_end) = SummaryPeriod::Today
            .bounds(today, None, None)
            .ok_or_else(|| anyhow::anyhow!("overflow de data no resumo"))?;
        let (month_start, month_end) = SummaryPeriod::Month
            .bounds(today, None, None)
            .ok_or_else(|| anyhow::anyhow!("overflow de data no resumo"))?;

        let total_products = self.repo.count_products().await?;
        let low_stock_count = self.repo.count_low_stock().await?;
        let (today_sales_total, today_order_count) =
            self.repo.sales_between(today_start, today_end).await?;

        let month_cash_in = self
            .finance_repo
            .sum_amount_between(TransactionType::CashIn, month_start, month_end)
            .await?;
        let month_cash_out = self
            .finance_repo
            .sum_amount_between(TransactionType::CashOut, month_start, month_end)
            .await?;

        Ok(DashboardSummary {
            total_products,
            low_stock_count,
            today_sales_total,
            today_order_count,
            month_cash_in,
            month_cash_out,
            month_net_cash_flow: month_cash_in - month_cash_out,
        })
    }

    pub async fn get_sales_chart(&self) -> Result<Vec<SalesChartEntry>, AppError> {
        // Últimos 30 dias, incluindo hoje.
        let today = Utc::now().date_naive();
        let start = today
            .checked_sub_days(Days::new(29))
            .ok_or_else(|| anyhow::anyhow!("overflow de data no gráfico de vendas"))?
            .and_time(NaiveTime::MIN)
            .and_utc();
        self.repo.sales_chart_since(start).await
    }

    pub async fn get_top_products(&self) -> Result<Vec<TopProductEntry>, AppError> {
        self.repo.top_products(5).await
    }
}
