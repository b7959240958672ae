use std::sync::LazyLock;

/// What a chat command is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Intent {
    ShowExpenses,
    ShowIncome,
    ShowDashboard,
    Analyze,
    Balance,
    TotalIncome,
    Greeting,
}

pub(crate) struct IntentRule {
    pub(crate) intent: Intent,
    pub(crate) description: &'static str,
    pub(crate) matches: fn(&str) -> bool,
}

macro_rules! register_rule {
    ($intent:expr, $desc:expr, $pred:expr, $table:expr) => {{
        $table.push(IntentRule {
            intent: $intent,
            description: $desc,
            matches: $pred,
        });
    }};
}

/// Checked top to bottom against the lower-cased command; first hit wins.
pub(crate) static RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    let mut t: Vec<IntentRule> = Vec::new();

    register_rule!(
        Intent::ShowExpenses,
        "\"show expenses\" opens the expenses view",
        |c| c.contains("expense") && c.contains("show"),
        t
    );
    register_rule!(
        Intent::ShowIncome,
        "\"show income\" opens the income view",
        |c| c.contains("income") && c.contains("show"),
        t
    );
    register_rule!(
        Intent::ShowDashboard,
        "\"dashboard\" or \"home\" returns to the dashboard",
        |c| c.contains("dashboard") || c.contains("home"),
        t
    );
    register_rule!(
        Intent::Analyze,
        "\"advice\", \"analyze\", \"how are we doing\", \"invest\" review the month",
        |c| ["advice", "analyze", "how are we doing", "invest"]
            .iter()
            .any(|k| c.contains(k)),
        t
    );
    register_rule!(
        Intent::Balance,
        "\"balance\" reports the actual balance",
        |c| c.contains("balance"),
        t
    );
    register_rule!(
        Intent::TotalIncome,
        "\"total income\" reports income received",
        |c| c.contains("total income"),
        t
    );
    register_rule!(
        Intent::Greeting,
        "\"hello\" or \"hi\"",
        |c| c.contains("hello") || has_word(c, "hi"),
        t
    );

    t
});

/// Lower-case `input` and return the first matching intent.
pub(crate) fn classify(input: &str) -> Option<Intent> {
    let cmd = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.matches)(&cmd))
        .map(|rule| rule.intent)
}

fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|w| w == word)
}
