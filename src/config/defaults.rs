// src/config/defaults.rs
//! Built-in seed used when no `collector.toml` is found.
//!
//! Order matters in `CATEGORY_TABLE` and `SOURCE_TYPE_MARKERS`: both are
//! evaluated top to bottom and the first hit wins.

pub const DEFAULT_OUTPUT_CSV: &str = "docs/data/deepwater_news.csv";
pub const DEFAULT_HISTORY_FILE: &str = "article_history.txt";
pub const DEFAULT_MIRROR_PATHS: &[&str] = &["web_app/data/deepwater_news.csv"];
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";
pub const DEFAULT_CATEGORY: &str = "oil & gas";
pub const DEFAULT_USER_AGENT: &str =
    concat!("deepwater-news-collector/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_MAX_ARTICLES_PER_SOURCE: usize = 5;
pub const DEFAULT_FEED_DELAY_SECS: u64 = 2;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const FEEDS: &[&str] = &[
    // Oil & gas industry news
    "https://www.offshore-mag.com/rss/",
    "https://www.rigzone.com/news/rss/rigzone_latest.aspx",
    "https://www.worldoil.com/rss/news",
    "https://www.oilprice.com/rss/main",
    "https://www.offshore-technology.com/feed/",
    "https://www.ogj.com/rss/",
    "https://www.hydrocarbonprocessing.com/rss/",
    // Energy & industry publications
    "https://www.spglobal.com/commodityinsights/en/rss-feed/oil",
    "https://www.reuters.com/markets/commodities/energy/rss",
    "https://www.bloomberg.com/feed/podcast/bnn-bloomberg-markets.xml",
    // Gulf of Mexico / America
    "https://www.boem.gov/newsroom/rss.xml",
    "https://www.bsee.gov/newsroom/rss.xml",
    // Drilling & exploration
    "https://www.drillingcontractor.org/feed",
    "https://jpt.spe.org/rss",
    // Natural gas
    "https://www.naturalgasintel.com/rss/",
    "https://www.naturalgasworld.com/feed/",
    // Energy general
    "https://www.energy.gov/rss.xml",
    "https://www.eia.gov/rss/todayinenergy.xml",
    // Subsea & pipeline
    "https://www.offshore-energy.biz/feed/",
    "https://www.subsea-world-news.com/feed/",
    // Operators
    "https://news.exxonmobil.com/rss/news-releases.aspx",
    "https://www.chevron.com/rss/news",
    "https://www.shell.com/rss/news-and-media-releases.html",
    "https://www.bp.com/content/bp/en/global/corporate/news-releases.rss.xml",
];

pub const RELEVANCE_KEYWORDS: &[&str] = &[
    // Deepwater & offshore drilling
    "deepwater", "deep water", "deep-water", "offshore drilling", "offshore oil",
    "offshore gas", "ultra-deepwater", "subsea", "floating production",
    "drilling rig", "drillship", "semi-submersible", "jack-up", "fpso",
    "spar platform", "tension leg platform", "tlp",
    // Gulf of America / Mexico
    "gulf of mexico", "gulf of america", "gom", "outer continental shelf",
    "ocs", "boem", "bsee", "louisiana offshore", "texas offshore",
    "mississippi canyon", "green canyon", "garden banks", "alaminos canyon",
    "keathley canyon", "walker ridge",
    // Oil & gas general
    "oil exploration", "gas exploration", "petroleum", "crude oil",
    "natural gas", "hydrocarbon", "oil production", "gas production",
    "upstream oil", "upstream gas", "e&p", "exploration and production",
    // Wells & drilling
    "oil well", "gas well", "drilling operations", "well completion",
    "well intervention", "workover", "wellhead", "blowout preventer",
    "bop", "casing", "drilling mud", "well control", "spudding",
    // Pipelines & infrastructure
    "offshore pipeline", "subsea pipeline", "gas pipeline", "oil pipeline",
    "flowline", "riser", "umbilical", "manifold", "subsea infrastructure",
    "pipeline construction", "pipeline integrity",
    // Integrated gas & LNG
    "integrated gas", "lng", "liquefied natural gas", "gas processing",
    "gas liquefaction", "lng terminal", "floating lng", "flng",
    "gas export", "lng export",
    // Reserves & resources
    "oil reserves", "gas reserves", "proven reserves", "probable reserves",
    "barrels of oil", "bcf", "billion cubic feet", "mmcf", "mboe",
    "recoverable reserves", "oil discovery", "gas discovery",
    // Companies & operations
    "shell deepwater", "bp deepwater", "chevron deepwater", "exxon deepwater",
    "conocophillips", "petrobras", "equinor", "total energies",
    "occidental petroleum", "murphy oil", "anadarko", "noble energy",
    // Safety & environment
    "offshore safety", "well integrity", "spill prevention", "oil spill",
    "environmental monitoring", "decommissioning", "plugging and abandonment",
    // Industry terms
    "barrel per day", "bpd", "production rate", "first oil",
    "final investment decision", "fid", "sanctioned project",
    "lease sale", "block award", "acreage", "prospect",
];

pub const INDUSTRY_TERMS: &[&str] = &[
    "production", "drilling", "discovery", "reserves", "investment",
    "barrel", "cubic feet", "pipeline", "offshore", "deepwater",
    "exploration", "development", "project", "contract", "lease",
    "billion", "million", "percent", "growth", "decline",
];

pub const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    (
        "deepwater drilling",
        &["deepwater", "deep water", "ultra-deepwater", "drilling rig", "drillship", "semi-submersible", "jack-up"],
    ),
    (
        "gulf of america",
        &["gulf of mexico", "gulf of america", "gom", "outer continental shelf", "boem", "bsee", "louisiana", "texas offshore"],
    ),
    (
        "subsea & pipelines",
        &["subsea", "pipeline", "flowline", "riser", "umbilical", "manifold", "subsea infrastructure"],
    ),
    (
        "lng & integrated gas",
        &["lng", "liquefied natural gas", "integrated gas", "gas processing", "flng", "gas export"],
    ),
    (
        "exploration",
        &["oil exploration", "gas exploration", "discovery", "prospect", "seismic", "reserves"],
    ),
    (
        "production",
        &["oil production", "gas production", "fpso", "floating production", "first oil", "production rate"],
    ),
    (
        "wells",
        &["oil well", "gas well", "well completion", "well intervention", "workover", "wellhead", "bop"],
    ),
    ("crude oil", &["crude oil", "barrel", "bpd", "oil price", "wti", "brent"]),
    ("natural gas", &["natural gas", "bcf", "mcf", "gas price", "henry hub"]),
    (
        "safety & environment",
        &["offshore safety", "spill", "environmental", "decommissioning", "well integrity"],
    ),
];

pub const SOURCE_TYPE_MARKERS: &[(&str, &[&str])] = &[
    ("Government Agency", &["boem", "bsee"]),
    ("Major Operator", &["exxon", "chevron", "shell", "bp.com"]),
    ("Government Data", &["eia.gov", "energy.gov"]),
];

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
