use crate::foundation::error::{DotMatrixError, DotMatrixResult};

pub const DEFAULT_WORDS: &[&str] = &[
    "JAVA",
    "J2EE",
    "SPRING",
    "SPRING BOOT",
    "PYTHON",
    "DJANGO",
    "KOTLIN",
    "GO",
    "TYPESCRIPT",
    "JAVASCRIPT",
    "REACT",
    "ANGULAR",
    "NODE",
    "EXPRESS",
    "BUN",
    "HTML",
    "CSS",
    "DOCKER",
    "KUBERNETES",
    "K8S",
    "OPENSHIFT",
    "AWS",
    "AZURE",
    "GCP",
    "MYSQL",
    "MONGODB",
    "ORACLE",
    "GRAPHQL",
    "FIREBASE",
    "JENKINS",
    "BAMBOO",
    "ARGOCD",
    "ANSIBLE",
    "GRADLE",
    "MAVEN",
    "GITHUB",
    "BITBUCKET",
    "GIT",
    "TOMCAT",
    "NET",
    "API",
    "REST",
    "JDBC",
    "SQL",
];

/// Ordered pool of words the placement generator draws from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Words are uppercased; the list and each word must be non-empty.
    pub fn new<I, S>(words: I) -> DotMatrixResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for w in words {
            let w = w.as_ref().trim();
            if w.is_empty() {
                return Err(DotMatrixError::validation("vocabulary words must be non-empty"));
            }
            out.push(w.to_uppercase());
        }
        if out.is_empty() {
            return Err(DotMatrixError::validation("vocabulary must contain at least one word"));
        }
        Ok(Self { words: out })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words with at most `max_len` characters, in vocabulary order.
    pub fn filtered_by_len(&self, max_len: usize) -> Vec<&str> {
        self.words
            .iter()
            .filter(|w| w.chars().count() <= max_len)
            .map(String::as_str)
            .collect()
    }

    pub fn all(&self) -> Vec<&str> {
        self.words.iter().map(String::as_str).collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| (*w).to_owned()).collect(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Vocabulary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let words = Vec::<String>::deserialize(deserializer)?;
        Self::new(words).map_err(serde::de::Error::custom)
    }
}
