/// Reporting period registry for the monsoon rainfall pages.
///
/// One CSV file is published per period. This is the single source of
/// truth for period file names; pages and the site builder should look
/// periods up here rather than hardcoding names.

// ---------------------------------------------------------------------------
// Period metadata
// ---------------------------------------------------------------------------

/// Metadata for a single reporting period.
pub struct Period {
    /// File stem of the period CSV (`{name}.csv`), also the page name.
    pub name: &'static str,
    /// Page title, English.
    pub title: &'static str,
    /// Page title, Hindi.
    pub title_hi: &'static str,
}

/// All reporting periods, in season order.
pub static PERIOD_REGISTRY: &[Period] = &[
    Period {
        name: "june",
        title: "June Rainfall",
        title_hi: "जून वर्षा",
    },
    Period {
        name: "july",
        title: "July Rainfall",
        title_hi: "जुलाई वर्षा",
    },
    Period {
        name: "august",
        title: "August Rainfall",
        title_hi: "अगस्त वर्षा",
    },
    Period {
        name: "september",
        title: "September Rainfall",
        title_hi: "सितंबर वर्षा",
    },
    Period {
        name: "overall_monsoon",
        title: "Overall Monsoon Rainfall (June to September)",
        title_hi: "संपूर्ण मानसून वर्षा (जून से सितंबर)",
    },
];

/// Returns the file stems of all periods.
pub fn all_period_names() -> Vec<&'static str> {
    PERIOD_REGISTRY.iter().map(|p| p.name).collect()
}

/// Looks up a period by name. Returns `None` if not found.
pub fn find_period(name: &str) -> Option<&'static Period> {
    PERIOD_REGISTRY.iter().find(|p| p.name == name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
