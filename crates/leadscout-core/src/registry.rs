//! Built-in lookup tables
//!
//! `RosterRegistry` maps event URL substrings to precomputed rosters and
//! `IcpRegistry` maps company aliases to precomputed ICP descriptions. Both are
//! plain values handed to the stage that consults them, so tests can swap in
//! their own tables.

use crate::types::PersonRecord;

/// URL substring of the built-in Cerebral Valley roster
pub const CEREBRAL_VALLEY_KEY: &str = "cerebralvalley";

/// Cerebral Valley 2025 speakers and discussion leaders: name, title, company, company description
const CEREBRAL_VALLEY_2025: &[(&str, &str, &str, &str)] = &[
    (
        "Amjad Masad",
        "Founder & CEO",
        "Replit",
        "AI-powered cloud development platform enabling users to build apps and websites through natural language. Replit Agent automates software development with millions of users worldwide.",
    ),
    (
        "Mike Krieger",
        "Chief Product Officer",
        "Anthropic",
        "AI safety and research company that develops Claude, a family of LLMs designed with safety, helpfulness, and honesty as core principles. Valued at $183B.",
    ),
    (
        "Jimmy Ba",
        "Co-founder",
        "xAI",
        "Elon Musk's AI company focused on developing advanced AI systems to understand the universe. Building Grok AI assistant.",
    ),
    (
        "Guillermo Rauch",
        "Founder & CEO",
        "Vercel",
        "Cloud platform for frontend developers, creator of Next.js. Provides edge network, serverless functions, and Git-integrated deployments for modern web apps.",
    ),
    (
        "Winston Weinberg",
        "Founder & CEO",
        "Harvey",
        "AI-powered legal platform built on GPT-4 for law firms and corporations. Valued at $3B with 235 clients across 42 countries. Helps with legal research, drafting, and diligence.",
    ),
    (
        "Elad Gil",
        "Founder",
        "Gil & Co.",
        "Venture capital investor and advisor to major tech companies including Airbnb, Coinbase, Stripe, Square, and others.",
    ),
    (
        "Ilya Fushman",
        "Partner",
        "Kleiner Perkins",
        "Leading venture capital firm that has invested in companies like Amazon, Google, and Genentech. Focus on enterprise, consumer, and healthcare tech.",
    ),
    (
        "Andy Konwinski",
        "Co-founder",
        "Laude",
        "AI-powered conversation intelligence platform for sales teams. Helps analyze and improve sales calls and meetings.",
    ),
    (
        "Cristina Cordova",
        "COO",
        "Linear",
        "Modern issue tracking and project management tool for software teams. Known for exceptional design and performance. Used by thousands of companies.",
    ),
    (
        "Mati Staniszewski",
        "Founder & CEO",
        "ElevenLabs",
        "Leading AI voice generation company with 5,000+ voices in 70+ languages. Creates lifelike speech for content creators, businesses, and developers.",
    ),
    (
        "Tuhin Srivastava",
        "Founder & CEO",
        "Baseten",
        "ML infrastructure platform that helps companies deploy and scale machine learning models in production. Serverless ML deployment.",
    ),
    (
        "Eoghan McCabe",
        "Founder & CEO",
        "Intercom",
        "Customer messaging platform with AI-powered chatbots and support tools. Serves 25,000+ businesses with conversational relationship platform.",
    ),
    (
        "Christina Cacioppo",
        "Founder & CEO",
        "Vanta",
        "Security compliance automation platform. Helps companies get SOC 2, ISO 27001, HIPAA, and other certifications. Over 8,000 customers.",
    ),
    (
        "Aaron Levie",
        "Founder & CEO",
        "Box",
        "Enterprise cloud content management and file sharing platform. Publicly traded (NYSE: BOX) with millions of users across 100,000+ organizations.",
    ),
    (
        "Daniel Lurie",
        "Mayor",
        "City and County of San Francisco",
        "Mayor of San Francisco, focused on technology, innovation, and civic improvement in the Bay Area.",
    ),
    (
        "Parag Agrawal",
        "Founder & CEO",
        "Parallel Web Systems",
        "Former Twitter CEO building AI-powered software development tools. Focused on parallel computing and distributed systems.",
    ),
    (
        "Gabriel Hubert",
        "Founder & CEO",
        "Dust",
        "AI assistant platform for teams. Helps companies build custom AI assistants that connect to their data and workflows.",
    ),
    (
        "Anna Patterson",
        "Founder & CEO",
        "Ceramic.ai",
        "AI-powered data management and knowledge graph platform. Former Google engineer who built key parts of search infrastructure.",
    ),
    (
        "Kirsten Green",
        "Founder & Managing Partner",
        "Forerunner Ventures",
        "Leading consumer-focused VC firm. Early investor in Warby Parker, Glossier, Jet.com, Dollar Shave Club, and Chime.",
    ),
    (
        "Eleonore Crespo",
        "Founder & CEO",
        "Pigment",
        "Business planning platform that helps CFOs and finance teams with forecasting, modeling, and strategic planning. Over 400 enterprise customers.",
    ),
    (
        "Tudor Achim",
        "Founder & CEO",
        "Harmonic",
        "AI-powered search and knowledge management platform for teams. Helps companies organize and find information across all their tools.",
    ),
    (
        "Julie Bornstein",
        "Founder & CEO",
        "Daydream",
        "AI-powered fashion and shopping platform. Former Stitch Fix COO and Nordstrom executive building personalized shopping experiences.",
    ),
    (
        "Kevin Novak",
        "Founder & Managing Partner",
        "Rackhouse Venture Capital",
        "Early-stage venture capital firm focused on B2B SaaS, infrastructure, and developer tools.",
    ),
    (
        "Ophelia Brown",
        "Managing Partner",
        "Blossom Capital",
        "European VC firm focused on B2B software. Invested in companies like UiPath, Contentful, and Ledger.",
    ),
    (
        "Marc Boroditsky",
        "CRO",
        "Nebius",
        "Cloud infrastructure company spun out of Yandex. Provides GPU cloud and AI infrastructure for model training and inference.",
    ),
    (
        "Jai Das",
        "Co-founder, President & Partner",
        "Sapphire Ventures",
        "Growth-stage venture capital firm with $10B+ under management. Invested in LinkedIn, Box, AppDynamics, and others.",
    ),
    (
        "Astasia Myers",
        "General Partner",
        "Felicis",
        "VC firm focused on early-stage startups. Portfolio includes Shopify, Canva, Notion, and Plaid.",
    ),
    (
        "Stefan Weitz",
        "Co-founder & CEO",
        "HumanX",
        "Event series and community focused on human-centered AI and technology. Brings together leaders in AI, policy, and business.",
    ),
    (
        "Howie Xu",
        "Chief AI & Innovation Officer",
        "Gen",
        "Digital safety company (formerly Norton and Avast). Building AI-powered cybersecurity and privacy tools for consumers.",
    ),
    (
        "Sarah Wooders",
        "Founder & CTO",
        "Letta",
        "AI memory management platform. Helps AI agents maintain context and memory across conversations. Built by former Berkeley AI researchers.",
    ),
    (
        "Brooke Hopkins",
        "Founder & CEO",
        "Coval",
        "AI evaluation and testing platform for LLM applications. Helps companies ensure their AI systems are reliable and safe before deployment.",
    ),
    (
        "Ethan Lutske",
        "Partner",
        "Wilson Sonsini",
        "Top Silicon Valley law firm specializing in technology, startups, and venture capital. Represented Google, Apple, Tesla in major transactions.",
    ),
    (
        "Keith Figlioli",
        "Managing Partner",
        "LRVHealth",
        "Healthcare-focused venture capital firm investing in digital health, healthcare services, and life sciences companies.",
    ),
    (
        "Jake Saper",
        "General Partner",
        "Emergence Capital",
        "Enterprise SaaS-focused VC firm. Early investors in Salesforce, Zoom, Box, and other major SaaS companies.",
    ),
    (
        "Roy Bahat",
        "Head",
        "Bloomberg Beta",
        "Venture capital arm of Bloomberg LP. Focuses on the future of work, machine intelligence, and data-driven companies.",
    ),
];

/// Linkup's own ICP
pub const LINKUP_ICP: &str = "Linkup's Ideal Customer Profile:
- Company Size: Startups to large enterprises needing scalable API solutions
- Target Industries: AI apps, SaaS platforms, Business Intelligence, Fintech, Legal Tech, LLM developers
- Buyer Roles: Product Directors, CPOs, COOs, AI/ML Engineers, CTOs, Technical Founders
- Pain Points:
  • Need fast, accurate web search for AI grounding and fact-checking
  • Require real-time fact-based information for AI agents
  • CRM enrichment with verified web data
  • Secure, compliant enterprise API solutions
- Primary Use Cases:
  • Powering AI agents with reliable, up-to-date data
  • Building chatbots and answer engines with sourced information
  • Company enrichment for lead generation and sales intelligence
  • Deep research, due diligence, and risk analysis
- Value Proposition: Linkup provides a search API that delivers accurate, real-time web data optimized for AI applications";

const LINKUP_ALIASES: &[&str] = &["linkup", "linkup.so", "linkup api", "https://www.linkup.so"];

// ============================================================================
// Roster registry
// ============================================================================

/// Precomputed rosters keyed by event URL substring
#[derive(Debug, Clone, Default)]
pub struct RosterRegistry {
    entries: Vec<(String, Vec<PersonRecord>)>,
}

impl RosterRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the rosters shipped in the binary
    #[must_use]
    pub fn builtin() -> Self {
        let roster = CEREBRAL_VALLEY_2025
            .iter()
            .map(|(name, title, company, description)| {
                PersonRecord::new(*name, *title, *company).with_snippet(*description)
            })
            .collect();
        Self::new().with_roster(CEREBRAL_VALLEY_KEY, roster)
    }

    /// Register a roster under a URL substring (matched case-insensitively)
    #[must_use]
    pub fn with_roster(mut self, pattern: impl Into<String>, people: Vec<PersonRecord>) -> Self {
        self.entries.push((pattern.into().to_lowercase(), people));
        self
    }

    /// Roster whose pattern occurs in `event_url`, first registration wins
    pub fn lookup(&self, event_url: &str) -> Option<(&str, &[PersonRecord])> {
        let haystack = event_url.to_lowercase();
        self.entries
            .iter()
            .find(|(pattern, _)| !pattern.is_empty() && haystack.contains(pattern.as_str()))
            .map(|(pattern, people)| (pattern.as_str(), people.as_slice()))
    }

    /// Number of registered rosters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// ICP registry
// ============================================================================

/// Precomputed ICP descriptions keyed by company alias
#[derive(Debug, Clone, Default)]
pub struct IcpRegistry {
    entries: Vec<(Vec<String>, String)>,
}

impl IcpRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the profiles shipped in the binary
    #[must_use]
    pub fn builtin() -> Self {
        Self::new().with_profile(LINKUP_ALIASES.iter().copied(), LINKUP_ICP)
    }

    /// Register a description under several aliases (names or URLs)
    #[must_use]
    pub fn with_profile<I, S>(mut self, aliases: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = aliases
            .into_iter()
            .map(|alias| normalize_company_key(alias.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        self.entries.push((keys, description.into()));
        self
    }

    /// Description for the first candidate (company name or URL) matching an alias
    pub fn lookup<'a, I>(&self, candidates: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keys: Vec<String> = candidates
            .into_iter()
            .map(normalize_company_key)
            .filter(|key| !key.is_empty())
            .collect();

        self.entries
            .iter()
            .find(|(aliases, _)| keys.iter().any(|key| aliases.contains(key)))
            .map(|(_, description)| description.as_str())
    }
}

/// Lowercase, strip scheme, `www.`, path and surrounding whitespace.
///
/// ```
/// use leadscout_core::registry::normalize_company_key;
///
/// assert_eq!(normalize_company_key("https://www.Linkup.so/"), "linkup.so");
/// assert_eq!(normalize_company_key("  Linkup API "), "linkup api");
/// ```
pub fn normalize_company_key(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let has_scheme = lowered.contains("://");
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);
    let host = if has_scheme {
        without_www.split(['/', '?', '#']).next().unwrap_or_default()
    } else {
        without_www.trim_end_matches('/')
    };
    host.trim().to_string()
}
