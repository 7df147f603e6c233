//! Fixed vocabularies used by the extractor.

/// Sri Lankan cities recognized as locations, lowercase.
pub const CITY_GAZETTEER: &[&str] = &[
    "colombo",
    "kandy",
    "galle",
    "jaffna",
    "negombo",
    "anuradhapura",
    "trincomalee",
    "batticaloa",
    "matara",
    "gampaha",
    "kurunegala",
    "ratnapura",
    "badulla",
    "nuwara eliya",
];

/// Service surface forms mapped to canonical category slugs.
pub const SERVICE_VOCABULARY: &[(&str, &str)] = &[
    ("plumber", "plumbing"),
    ("plumbing", "plumbing"),
    ("electrician", "electrical"),
    ("electrical", "electrical"),
    ("carpenter", "carpentry"),
    ("carpentry", "carpentry"),
    ("painter", "painting"),
    ("painting", "painting"),
    ("cleaner", "cleaning"),
    ("cleaning", "cleaning"),
    ("gardener", "gardening"),
    ("gardening", "gardening"),
    ("mechanic", "mechanical"),
    ("catering", "catering"),
    ("photographer", "photography"),
    ("photography", "photography"),
    ("tuition", "tuition"),
    ("tutor", "tuition"),
];

/// Stopwords dropped during keyword extraction.
pub const STOPWORDS: &[&str] = &[
    "all", "and", "any", "are", "been", "being", "but", "can", "did", "does", "doing", "down",
    "each", "few", "for", "from", "further", "had", "has", "have", "having", "her", "here", "hers",
    "him", "his", "how", "into", "its", "just", "more", "most", "nor", "not", "now", "off", "once",
    "only", "other", "our", "ours", "out", "over", "own", "same", "she", "should", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "then", "there", "these", "they", "this",
    "those", "through", "too", "under", "until", "very", "was", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "you", "your", "yours",
];
