//! Generation context records and prompt assembly.
//!
//! Each generation operation takes a plain context record assembled by the
//! tracker layer (goal fields plus analytics output) and renders it into a
//! prompt that asks for a single JSON object of the operation's shape.

/// Context for generating a complete multi-day plan.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Title of the goal
    pub title: String,
    /// Requested duration in days; floored at 1 when building the prompt
    pub total_days: u32,
    /// Daily time commitment, free-form
    pub daily_time: Option<String>,
    /// Kind of goal
    pub goal_type: Option<String>,
    /// Self-reported skill level
    pub skill_level: Option<String>,
}

impl PlanRequest {
    /// Requested duration with the 1-day floor applied.
    pub fn safe_total_days(&self) -> u32 {
        self.total_days.max(1)
    }
}

/// Context for generating today's task set.
#[derive(Debug, Clone, Default)]
pub struct DailyContext {
    /// Title of the goal
    pub goal_title: String,
    /// Kind of goal
    pub goal_type: Option<String>,
    /// Current 1-based mission day
    pub current_day: u32,
    /// Total mission length in days
    pub total_days: u32,
    /// Daily time commitment, free-form
    pub daily_time: Option<String>,
    /// Label of the current phase
    pub current_phase: String,
    /// Yesterday's collapsed status ("completed" or "skipped")
    pub yesterday_status: String,
    /// Self-reported mood
    pub mood: Option<String>,
}

/// Context for generating the dashboard summary.
#[derive(Debug, Clone, Default)]
pub struct SummaryContext {
    /// Title of the goal
    pub goal_title: String,
    /// Total mission length in days
    pub total_days: u32,
    /// Current 1-based mission day
    pub current_day: u32,
    /// Distinct dates with at least one completed task
    pub days_completed: u32,
    /// Past dates with at least one uncompleted task
    pub days_missed: u32,
    /// Current streak
    pub current_streak: u32,
    /// Trailing-week completion percentage
    pub weekly_rate: u8,
    /// Mission coverage percentage
    pub progress_percentage: u8,
    /// Average completed minutes per day, e.g. "25m"
    pub avg_time: String,
    /// Label of the current phase
    pub current_phase: String,
    /// Today's status string
    pub today_status: String,
}

/// Context for generating one notification.
#[derive(Debug, Clone, Default)]
pub struct NotificationContext {
    /// Name to address the user by
    pub user_name: Option<String>,
    /// Title of the goal
    pub goal_title: String,
    /// Current 1-based mission day
    pub current_day: u32,
    /// Total mission length in days
    pub total_days: u32,
    /// Today's status string
    pub today_status: String,
    /// Yesterday's collapsed status
    pub yesterday_status: String,
    /// Current streak
    pub current_streak: u32,
    /// Trailing-week completion percentage
    pub weekly_rate: u8,
    /// Self-reported mood
    pub mood: Option<String>,
    /// Time of day the notification is for
    pub time_of_day: Option<String>,
}

fn or_unspecified(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unspecified")
}

/// Prompt for a complete day-by-day plan.
pub fn plan_prompt(req: &PlanRequest) -> String {
    let days = req.safe_total_days();
    format!(
        "You are a mission planning coach. Create a complete execution plan \
         for a user's goal.\n\
         Goal: \"{title}\"\n\
         Duration: {days} days\n\
         Daily time: {daily_time}\n\
         Goal type: {goal_type}\n\
         Skill level: {skill_level}\n\n\
         Rules:\n\
         1. Tone: supportive and direct.\n\
         2. Every day from day 1 to day {days} must be mapped.\n\
         3. Return a JSON object with a \"fullPlan\" array where each item \
         is {{ \"day\": number, \"theme\": string, \"tasks\": [{{\"title\": \
         string, \"time\": minutes}}] }}.\n\n\
         JSON structure:\n\
         {{\n\
           \"goalTitle\": \"{title}\",\n\
           \"totalDays\": {days},\n\
           \"summary\": \"strategic overview\",\n\
           \"fullPlan\": [ {{ \"day\": 1, \"theme\": \"Kickoff\", \"tasks\": \
         [{{\"title\": \"Initial setup\", \"time\": 30}}] }} ],\n\
           \"phases\": [ {{ \"phase\": \"Phase name\", \"weeks\": [1, 2], \
         \"focus\": \"Focus area\" }} ],\n\
           \"rules\": {{ \"bufferDaysPerWeek\": 1, \"maxTasksPerDay\": 3, \
         \"skipLogic\": \"advice\" }}\n\
         }}\n\
         CRITICAL: Return ONLY valid JSON.",
        title = req.title,
        days = days,
        daily_time = or_unspecified(&req.daily_time),
        goal_type = or_unspecified(&req.goal_type),
        skill_level = or_unspecified(&req.skill_level),
    )
}

/// Prompt for today's actionable task set.
pub fn daily_prompt(ctx: &DailyContext) -> String {
    format!(
        "You are a mission planning coach guiding the user day by day.\n\
         Based on the plan and mood below, generate TODAY's actionable \
         tasks. Be specific.\n\n\
         Goal: {title} (day {day}/{total})\n\
         Goal type: {goal_type}\n\
         Phase: {phase}\n\
         Yesterday: {yesterday}\n\
         Mood: {mood}\n\
         Daily time: {daily_time}\n\n\
         Return JSON:\n\
         {{\n\
           \"day\": {day},\n\
           \"focus\": \"brief focus for the day\",\n\
           \"microHabit\": \"tiny two-minute win\",\n\
           \"tasks\": [ {{ \"title\": \"action verb + result\", \"time\": 20, \
         \"type\": \"Practice\", \"difficulty\": \"Easy\" }} ],\n\
           \"coachMessage\": \"short encouragement\"\n\
         }}\n\
         CRITICAL: Return ONLY valid JSON.",
        title = ctx.goal_title,
        day = ctx.current_day,
        total = ctx.total_days,
        goal_type = or_unspecified(&ctx.goal_type),
        phase = ctx.current_phase,
        yesterday = ctx.yesterday_status,
        mood = ctx.mood.as_deref().unwrap_or("Neutral"),
        daily_time = or_unspecified(&ctx.daily_time),
    )
}

/// Prompt for the dashboard summary.
pub fn summary_prompt(ctx: &SummaryContext) -> String {
    format!(
        "You are a mission planning coach analyzing the user's dashboard. \
         Tone: analytical and supportive.\n\
         Goal: {title}\n\
         Progress: day {day}/{total}, {completed} days completed, {missed} \
         missed\n\
         Streak: {streak} days\n\
         Weekly completion: {weekly}%\n\
         Average focus: {avg} per day\n\
         Phase: {phase}\n\
         Today: {today}\n\n\
         Return JSON:\n\
         {{\n\
           \"goalTitle\": \"{title}\",\n\
           \"progressPercentage\": {progress},\n\
           \"dayStatusText\": \"day {day} status line\",\n\
           \"streakText\": \"{streak} day streak\",\n\
           \"aiInsight\": \"one supportive insight\",\n\
           \"primaryAction\": \"the next win\"\n\
         }}\n\
         CRITICAL: Return ONLY valid JSON.",
        title = ctx.goal_title,
        day = ctx.current_day,
        total = ctx.total_days,
        completed = ctx.days_completed,
        missed = ctx.days_missed,
        streak = ctx.current_streak,
        weekly = ctx.weekly_rate,
        avg = ctx.avg_time,
        phase = ctx.current_phase,
        today = ctx.today_status,
        progress = ctx.progress_percentage,
    )
}

/// Prompt for one short notification.
pub fn notification_prompt(ctx: &NotificationContext) -> String {
    format!(
        "Generate ONE short mission notification. Tone: friendly, not \
         robotic.\n\
         User: {name}, Goal: {title}, Day: {day}/{total}\n\
         Today: {today}, Yesterday: {yesterday}\n\
         Streak: {streak}, Weekly completion: {weekly}%\n\
         Mood: {mood}, Time of day: {time_of_day}\n\
         Return JSON: {{ \"title\": string, \"message\": string, \"cta\": \
         string }}\n\
         CRITICAL: Return ONLY valid JSON.",
        name = or_unspecified(&ctx.user_name),
        title = ctx.goal_title,
        day = ctx.current_day,
        total = ctx.total_days,
        today = ctx.today_status,
        yesterday = ctx.yesterday_status,
        streak = ctx.current_streak,
        weekly = ctx.weekly_rate,
        mood = ctx.mood.as_deref().unwrap_or("Neutral"),
        time_of_day = ctx.time_of_day.as_deref().unwrap_or("morning"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_prompt_floors_duration_at_one_day() {
        let req = PlanRequest {
            title: "Learn Rust".to_string(),
            total_days: 0,
            ..Default::default()
        };
        assert_eq!(req.safe_total_days(), 1);
        assert!(plan_prompt(&req).contains("Duration: 1 days"));
    }

    #[test]
    fn test_daily_prompt_defaults_mood_to_neutral() {
        let ctx = DailyContext {
            goal_title: "Learn Rust".to_string(),
            current_day: 4,
            total_days: 30,
            current_phase: "Kickoff".to_string(),
            yesterday_status: "completed".to_string(),
            ..Default::default()
        };
        let prompt = daily_prompt(&ctx);
        assert!(prompt.contains("Mood: Neutral"));
        assert!(prompt.contains("day 4/30"));
    }
}
