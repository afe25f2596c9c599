//! Declarative catalogue of the metrics reported, grouped into display categories.
//!
//! Catalogue files may spell a metric either as a bare column name or as a
//! `[column, display name]` pair. Both forms are normalized into [`Metric`]
//! records when the catalogue is loaded, so the rest of the pipeline never
//! inspects the original spelling.
//!
//! ```json
//! {
//!   "categories": [
//!     { "name": "Inventario", "metrics": ["fonemi presenti", ["% fonemi presenti", "Completezza Inventario (%)"]] }
//!   ]
//! }
//! ```

use std::{collections::HashSet, io};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct as _};

/// A reported metric: the source column and the name shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub source: String,
    pub display: String,
}

impl Metric {
    /// Metric whose display name is its column name.
    #[must_use]
    pub fn bare(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            display: source.to_owned(),
        }
    }

    #[must_use]
    pub fn renamed(source: &str, display: &str) -> Self {
        Self {
            source: source.to_owned(),
            display: display.to_owned(),
        }
    }
}

/// Named, ordered collection of metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub metrics: Vec<Metric>,
}

/// Ordered list of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCatalogue {
    categories: Vec<Category>,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CatalogueError {
    #[display("invalid catalogue JSON")]
    Json(serde_json::Error),
    #[display("duplicate category '{_0}'")]
    DuplicateCategory(#[error(not(source))] String),
}

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    metrics: Vec<MetricEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetricEntry {
    Bare(String),
    Renamed(String, String),
}

impl From<MetricEntry> for Metric {
    fn from(entry: MetricEntry) -> Self {
        match entry {
            MetricEntry::Bare(source) => Metric {
                display: source.clone(),
                source,
            },
            MetricEntry::Renamed(source, display) => Metric { source, display },
        }
    }
}

impl Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.source == self.display {
            serializer.serialize_str(&self.source)
        } else {
            (&self.source, &self.display).serialize(serializer)
        }
    }
}

impl Serialize for MetricCatalogue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct CategoryRef<'a> {
            name: &'a str,
            metrics: &'a [Metric],
        }

        let categories = self
            .categories
            .iter()
            .map(|c| CategoryRef {
                name: &c.name,
                metrics: &c.metrics,
            })
            .collect::<Vec<_>>();
        let mut s = serializer.serialize_struct("MetricCatalogue", 1)?;
        s.serialize_field("categories", &categories)?;
        s.end()
    }
}

impl MetricCatalogue {
    /// Creates a catalogue, rejecting repeated category names.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.name.as_str()) {
                return Err(CatalogueError::DuplicateCategory(category.name.clone()));
            }
        }
        Ok(Self { categories })
    }

    /// Parses a JSON catalogue.
    pub fn from_reader<R>(reader: R) -> Result<Self, CatalogueError>
    where
        R: io::Read,
    {
        let file: CatalogueFile = serde_json::from_reader(reader).map_err(CatalogueError::Json)?;
        let categories = file
            .categories
            .into_iter()
            .map(|entry| Category {
                name: entry.name,
                metrics: entry.metrics.into_iter().map(Metric::from).collect(),
            })
            .collect();
        Self::new(categories)
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Iterates over every metric, in catalogue order.
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.categories.iter().flat_map(|c| &c.metrics)
    }

    /// The battery of speech and language measures reported by default.
    #[must_use]
    pub fn builtin() -> Self {
        use Metric as M;

        let category = |name: &str, metrics: Vec<Metric>| Category {
            name: name.to_owned(),
            metrics,
        };
        Self {
            categories: vec![
                category(
                    "Generali",
                    vec![
                        M::renamed("raven risposte corrette", "Raven"),
                        M::renamed("denominazione", "Denominazione (BVL)"),
                        M::renamed("articolazione", "Articolazione (BVL)"),
                        M::renamed("ripetizione frasi", "Ripetizione Frasi (BVL)"),
                        M::renamed("ripetizione NP", "Ripetizione Non Parole (BVL)"),
                        M::renamed("totale fluenza", "Fluenza semantica (TNL)"),
                    ],
                ),
                category(
                    "Produttività",
                    vec![
                        M::renamed("tempo descrittivo MMS_FA", "Tempo Descrittivo"),
                        M::renamed("MLU_units", "LME (Unità)"),
                        M::renamed("MLU_words", "LME (Parole)"),
                        M::renamed("totale parole", "Parole Totali"),
                        M::bare("% mono-bisillabiche"),
                        M::bare("% trisillabiche"),
                        M::bare("% polisillabiche"),
                    ],
                ),
                category(
                    "Accuratezza",
                    vec![
                        M::renamed("% parole corrette", "Parole Corrette (%)"),
                        M::renamed("% parole solo processi", "Processi Fonologici (%)"),
                        M::renamed("‰ idios", "Idiosincrasie (‰)"),
                        M::renamed("% variabilità", "Variabilità (%)"),
                        M::renamed("%globalAccuracy", "Accuratezza Globale (%)"),
                        M::renamed("%consonantAccuracy", "Accuratezza Consonantica (%)"),
                        M::renamed("% distortions", "Distorsioni (%)"),
                        M::renamed("% falsestart", "False Partenze (%)"),
                    ],
                ),
                category(
                    "Modo Articolazione",
                    [
                        "% occlusive",
                        "% fricative",
                        "% affricate",
                        "% nasali",
                        "% laterali",
                        "% polivibranti",
                    ]
                    .into_iter()
                    .map(M::bare)
                    .collect(),
                ),
                category(
                    "Luogo Articolazione",
                    [
                        "% bilabiali",
                        "% labio-dentali",
                        "% dentali",
                        "% alveolari",
                        "% postalveolari",
                        "% palatali",
                        "% velari",
                    ]
                    .into_iter()
                    .map(M::bare)
                    .collect(),
                ),
                category(
                    "Inventario",
                    vec![
                        M::bare("fonemi presenti"),
                        M::bare("fonemi emergenti"),
                        M::bare("fonemi assenti"),
                        M::renamed("% fonemi presenti", "Completezza Inventario (%)"),
                    ],
                ),
                category(
                    "Metriche sperimentali",
                    vec![
                        M::renamed("TTR * 100", "TTR (%)"),
                        M::renamed("HDD * 100", "HDD (%)"),
                        M::renamed("MATTR50 * 100", "MATTR50 (%)"),
                        M::renamed("MATTR5% * 100", "MATTR5% (%)"),
                        M::bare("MTLD"),
                        M::bare("WIM"),
                        M::bare("vocD"),
                        M::renamed(
                            "lexicalDensity (content/words) * 100",
                            "Lexical Density (%)",
                        ),
                        M::renamed("overall similarity * 100", "Overall Similarity (%)"),
                    ],
                ),
            ],
        }
    }
}
