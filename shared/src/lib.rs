use serde::{Deserialize, Serialize};
use std::fmt;

/// Expense category owned by a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Emoji or icon name shown next to the category
    pub icon: String,
    /// Display color as a hex string (e.g. "#FF6B6B")
    pub color: String,
    /// True for rows created by default seeding
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentMethodRequest {
    pub name: String,
    pub icon: String,
}

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub name: String,
    /// Positive amount in the user's currency
    pub amount: f64,
    pub category_id: String,
    /// Calendar day in YYYY-MM-DD format
    pub date: String,
    /// Payment method name as entered (not a foreign key)
    pub payment_method: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub receipt_ref: Option<String>,
}

/// Expense joined with its category as it looked when the list was built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseWithCategory {
    #[serde(flatten)]
    pub expense: Expense,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseListRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub name: String,
    pub amount: f64,
    pub category_id: String,
    pub date: String,
    pub payment_method: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub receipt_ref: Option<String>,
}

/// Partial update; only provided fields are written
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub category_id: Option<String>,
    pub date: Option<String>,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub receipt_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStatsRequest {
    /// Target month in YYYY-MM format; defaults to the current month
    pub month: Option<String>,
}

/// Per-category total captured at aggregation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub total: f64,
    /// Share of the month total (0-100)
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub month: String,
    pub total_month: f64,
    pub total_prev_month: f64,
    pub daily_average: f64,
    pub expense_count: usize,
    pub category_breakdown: Vec<CategoryTotal>,
    pub recent_expenses: Vec<Expense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub start_date: String,
    pub end_date: String,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub start_date: String,
    pub end_date: String,
    pub total: f64,
    pub count: usize,
    pub average: f64,
    pub category_breakdown: Vec<BreakdownEntry>,
    pub payment_method_breakdown: Vec<BreakdownEntry>,
    pub daily_breakdown: Vec<DailyTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    /// Budget period in YYYY-MM format
    pub month_year: String,
    pub limit: f64,
}

/// Spend-vs-limit classification of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Safe,
    Caution,
    Warning,
    Exceeded,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::Safe => "safe",
            BudgetStatus::Caution => "caution",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetWithStatus {
    #[serde(flatten)]
    pub budget: Budget,
    pub category: Option<Category>,
    pub spent: f64,
    /// May be negative when the budget is exceeded
    pub remaining: f64,
    /// Progress-bar value, clamped to 100
    pub percentage: f64,
    /// Unclamped spent/limit ratio used for classification
    pub raw_percentage: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetListRequest {
    pub month_year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBudgetRequest {
    pub category_id: String,
    pub month_year: String,
    pub limit: f64,
}

/// Alert severity; budgets in the safe range never produce an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Caution,
    Warning,
    Exceeded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub budget_id: String,
    pub category_name: String,
    pub category_icon: String,
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    /// Target day in YYYY-MM-DD format
    pub target_date: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsGoalStatus {
    Active,
    Urgent,
    Overdue,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalWithProgress {
    #[serde(flatten)]
    pub goal: SavingsGoal,
    /// Progress-bar value, clamped to 100
    pub percentage: f64,
    pub remaining: f64,
    pub days_remaining: i64,
    pub status: SavingsGoalStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSavingsGoalRequest {
    pub name: String,
    pub target_amount: f64,
    pub target_date: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateSavingsGoalRequest {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub target_date: Option<String>,
    pub description: Option<String>,
}

/// Signed delta applied to a goal's current amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSavingsProgressRequest {
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub budget_alerts: bool,
    pub weekly_reports: bool,
    pub monthly_reports: bool,
    pub goal_reminders: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyPreferences {
    pub share_data: bool,
    pub analytics: bool,
    pub marketing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub currency: String,
    pub language: String,
    pub timezone: String,
    pub notifications: NotificationPreferences,
    pub privacy: PrivacyPreferences,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub preferences: Option<UserPreferences>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user_id: String,
    pub category_ids: Vec<String>,
    pub payment_method_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Month bucket in YYYY-MM format
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategory {
    pub category_id: String,
    pub name: String,
    pub icon: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_expenses: usize,
    pub total_amount: f64,
    pub categories_used: usize,
    pub days_active: usize,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub max_monthly_amount: f64,
    pub top_categories: Vec<TopCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub preferences: Option<UserPreferences>,
}

/// Full snapshot of everything a user owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataExport {
    /// RFC 3339 timestamp of when the snapshot was taken
    pub export_date: String,
    pub user: UserInfo,
    pub expenses: Vec<Expense>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub savings_goals: Vec<SavingsGoal>,
    pub payment_methods: Vec<PaymentMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedIdsResponse {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error class (unauthenticated, not_found, conflict, validation, storage)
    pub kind: String,
}
