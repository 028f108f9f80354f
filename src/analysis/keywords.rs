//! Fixed word lists used by the heuristics.

pub const POSITIVE_WORDS: &[&str] = &[
    "excellent",
    "great",
    "amazing",
    "wonderful",
    "fantastic",
    "best",
    "perfect",
    "outstanding",
    "superb",
    "brilliant",
    "exceptional",
    "incredible",
    "awesome",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "difficult",
    "problem",
    "issue",
    "error",
    "challenge",
    "complex",
    "hard",
    "terrible",
    "awful",
    "horrible",
    "disappointing",
    "frustrating",
    "confusing",
];

pub const BEGINNER_PHRASES: &[&str] = &[
    "simple",
    "easy",
    "basic",
    "introduction",
    "getting started",
    "beginner",
    "first steps",
    "quick start",
    "tutorial",
    "guide",
    "how to",
];

pub const ADVANCED_PHRASES: &[&str] = &[
    "advanced",
    "complex",
    "sophisticated",
    "expert",
    "enterprise",
    "professional",
    "optimization",
    "performance",
    "scalability",
    "architecture",
    "implementation",
];

/// Topic categories in output order, each with its trigger substrings.
pub const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "setup",
        &["setup", "install", "configuration", "initialization", "getting started"],
    ),
    ("integration", &["integration", "connect", "api", "webhook", "sync"]),
    (
        "performance",
        &["performance", "speed", "optimization", "fast", "efficient"],
    ),
    ("seo", &["seo", "search engine", "meta", "optimization", "ranking"]),
    (
        "security",
        &["security", "authentication", "authorization", "secure", "protection"],
    ),
    (
        "multilingual",
        &["multilingual", "i18n", "internationalization", "translation", "language"],
    ),
    ("components", &["component", "module", "widget", "block", "element"]),
    ("api", &["api", "endpoint", "rest", "graphql", "webhook"]),
    ("cms", &["cms", "content management", "headless", "storyblok"]),
    ("react", &["react", "jsx", "component", "hook", "state"]),
    ("nextjs", &["nextjs", "next.js", "ssr", "ssg", "isr"]),
    ("javascript", &["javascript", "js", "es6", "typescript", "ts"]),
    (
        "tutorial",
        &["tutorial", "guide", "how to", "step by step", "walkthrough"],
    ),
    (
        "best-practices",
        &["best practice", "recommendation", "tip", "advice", "guideline"],
    ),
];

pub const KNOWN_ENTITIES: &[&str] = &[
    "Storyblok",
    "React",
    "Next.js",
    "API",
    "CMS",
    "JavaScript",
    "TypeScript",
    "Node.js",
    "Algolia",
    "Supabase",
    "Vercel",
    "AWS",
    "Google",
    "Microsoft",
    "GitHub",
    "GitLab",
    "Docker",
    "Kubernetes",
    "GraphQL",
    "REST",
    "JSON",
    "HTML",
    "CSS",
    "SASS",
    "SCSS",
    "Webpack",
    "Babel",
    "ESLint",
    "Prettier",
];

/// Content-type tags: the tag is added when any trigger occurs.
pub const CONTENT_TYPE_TAGS: &[(&str, &[&str])] = &[
    ("tutorial", &["tutorial", "how to"]),
    ("guide", &["guide", "walkthrough"]),
    ("api", &["api", "endpoint"]),
    ("best-practices", &["best practice", "recommendation"]),
];

/// Technology tags: the tag is added when any trigger occurs.
pub const TECHNOLOGY_TAGS: &[(&str, &[&str])] = &[
    ("react", &["react"]),
    ("nextjs", &["nextjs", "next.js"]),
    ("javascript", &["javascript"]),
    ("typescript", &["typescript"]),
    ("storyblok", &["storyblok"]),
];
