/// 字段补丁
///
/// `Set` 无条件覆盖，`FillIfAbsent` 仅在字段尚未赋值时填充。
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPatch<T> {
    Set(T),
    FillIfAbsent(T),
}

impl<T: Clone> FieldPatch<T> {
    /// 合并到目标字段
    pub fn merge_into(&self, slot: &mut Option<T>) {
        match self {
            FieldPatch::Set(value) => *slot = Some(value.clone()),
            FieldPatch::FillIfAbsent(value) => {
                if slot.is_none() {
                    *slot = Some(value.clone());
                }
            }
        }
    }
}

/// 一条覆盖规则携带的部分更新
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverridePatch {
    pub display_title: Option<FieldPatch<String>>,
    pub description: Option<FieldPatch<String>>,
    pub tags: Option<FieldPatch<Vec<String>>>,
    pub categories: Option<FieldPatch<Vec<String>>>,
    pub image_url: Option<FieldPatch<String>>,
}

/// 仓库名匹配条件（不区分大小写的子串匹配）
///
/// `all_of` 中的关键词必须全部出现；`any_of` 非空时至少出现其一。
#[derive(Debug, Clone, PartialEq)]
pub struct NameMatcher {
    pub all_of: &'static [&'static str],
    pub any_of: &'static [&'static str],
}

impl NameMatcher {
    pub const fn all(keywords: &'static [&'static str]) -> Self {
        Self {
            all_of: keywords,
            any_of: &[],
        }
    }

    pub const fn any(keywords: &'static [&'static str]) -> Self {
        Self {
            all_of: &[],
            any_of: keywords,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.all_of.iter().all(|k| lower.contains(k))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| lower.contains(k)))
    }
}

/// 覆盖规则
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRule {
    /// 项目族名称，仅用于日志
    pub family: &'static str,
    pub matcher: NameMatcher,
    pub patch: OverridePatch,
}

/// 有序的覆盖规则表
///
/// 所有命中的规则按表中顺序依次合并，靠后的规则会覆盖前面规则的无条件字段。
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    rules: Vec<OverrideRule>,
}

/// 图片处理策略
enum ImagePolicy {
    /// README中未找到图片时才使用
    Fallback(&'static str),
    /// 总是使用该图片，覆盖README中的图片
    Always(&'static str),
}

mod context_images {
    pub const HOTEL: &str = "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?auto=format&fit=crop&w=900&q=80";
    pub const VIZ: &str = "https://images.unsplash.com/photo-1556157382-97eda2d62296?auto=format&fit=crop&w=900&q=80";
    pub const NETWORK: &str = "https://images.unsplash.com/photo-1504384308090-c894fdcc538d?auto=format&fit=crop&w=900&q=80";
    pub const LOANS: &str = "https://images.unsplash.com/photo-1563013544-824ae1b704d3?auto=format&fit=crop&w=900&q=80";
    pub const TIMESERIES: &str = "https://images.unsplash.com/photo-1535320903710-d993d3d77d29?auto=format&fit=crop&w=900&q=80";
    pub const SHINY: &str = "https://images.unsplash.com/photo-1523475472560-d2df97ec485c?auto=format&fit=crop&w=900&q=80";
    pub const MLR: &str = "https://images.unsplash.com/photo-1517430816045-df4b7de11d1d?auto=format&fit=crop&w=900&q=80";
}

pub use context_images::{HOTEL as HOTEL_IMAGE, TIMESERIES as TIMESERIES_IMAGE};

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn rule(
    family: &'static str,
    matcher: NameMatcher,
    title: &str,
    description: &str,
    tags: &[&str],
    categories: &[&str],
    image: ImagePolicy,
) -> OverrideRule {
    let image_url = match image {
        ImagePolicy::Fallback(url) => FieldPatch::FillIfAbsent(url.to_string()),
        ImagePolicy::Always(url) => FieldPatch::Set(url.to_string()),
    };

    OverrideRule {
        family,
        matcher,
        patch: OverridePatch {
            display_title: Some(FieldPatch::Set(title.to_string())),
            description: Some(FieldPatch::Set(description.to_string())),
            tags: Some(FieldPatch::Set(to_strings(tags))),
            categories: Some(FieldPatch::Set(to_strings(categories))),
            image_url: Some(image_url),
        },
    }
}

impl OverrideTable {
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// 按表顺序返回命中给定仓库名的所有规则
    pub fn matching<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a OverrideRule> + 'a {
        self.rules.iter().filter(move |r| r.matcher.matches(name))
    }

    /// 内置的项目族覆盖规则
    pub fn builtin() -> Self {
        use context_images::*;

        Self::new(vec![
            rule(
                "customer-segmentation",
                NameMatcher::all(&["customer", "segment"]),
                "Customer Segmentation & RFM Analysis",
                "Customer segmentation using RFM and KMeans clustering (with kernel PCA) to create actionable customer groups and targeted marketing strategies.",
                &["Python", "R", "Clustering", "RFM"],
                &["Machine Learning", "Data Analysis"],
                ImagePolicy::Fallback(
                    "https://raw.githubusercontent.com/georgekalf/Customer-segmentation/main/too-broad-customer-segmentation.jpeg",
                ),
            ),
            rule(
                "hotel-reservations",
                NameMatcher::all(&["hotel", "reserv"]),
                "Hotel Reservation Cancellation & Guest Segmentation (ML)",
                "Explores hotel reservation data with EDA and KMeans clustering to segment guests and understand booking patterns. Trains multiple ML models to predict cancellations and compare performance.",
                &["Python", "ML", "Clustering", "XGBoost"],
                &["Machine Learning", "Data Analysis"],
                ImagePolicy::Fallback(HOTEL),
            ),
            rule(
                "imdb-helpful-reviews",
                NameMatcher::all(&["imdb"]),
                "IMDB Helpful Reviews Detection (NLP)",
                "Applying NLP techniques to detect helpful reviews on IMDB using text preprocessing, feature engineering and supervised learning models.",
                &["Python", "NLP", "Machine Learning"],
                &["Machine Learning", "NLP"],
                ImagePolicy::Always(
                    "https://raw.githubusercontent.com/Imdb-helpful-reviews-detection-NLP/Detection-of-helpful-reviews-on-IMDB-/main/IMDBs.jpg",
                ),
            ),
            rule(
                "fiat-500-nlp",
                NameMatcher::all(&["fiat", "nlp"]),
                "Fiat 500 EV – NLP Sentiment & Network Analysis",
                "NLP-driven sentiment analysis and network analytics on 10k+ YouTube comments to assess public perception of the Fiat 500 electric model. Explores community structure, influencer dynamics and engagement patterns using graph-based methods.",
                &["Python", "NLP", "Network Analysis", "APIs"],
                &["NLP"],
                ImagePolicy::Always(
                    "https://raw.githubusercontent.com/georgekalf/Fiat-500-NLP-NetworkAnalysis/main/electric_cars.jpeg",
                ),
            ),
            rule(
                "ishango-challenge",
                NameMatcher::all(&["ishango", "challenge"]),
                "Ishango Data Engineering Challenge",
                "Bigfoot Sightings Analysis: EDA, NLP & Semantic Classification.",
                &["Python", "SQL", "Data Engineering"],
                &["Data Analysis", "NLP"],
                ImagePolicy::Always(
                    "https://raw.githubusercontent.com/georgekalf/ishango-challenge/main/images/big_foot.jpg",
                ),
            ),
            rule(
                "web-scraping",
                NameMatcher::all(&["web", "scrap"]),
                "Web Scraping Projects (NBA & Aldi Jobs)",
                "Web scraping pipelines for NBA defensive analytics and Aldi job postings, from data collection to cleaning, feature engineering and exploratory analysis.",
                &["Python", "Web Scraping", "APIs"],
                &["Data Analysis"],
                ImagePolicy::Always(
                    "https://raw.githubusercontent.com/georgekalf/web-scraping/main/web-scraping.jpeg",
                ),
            ),
            rule(
                "data-management-mongodb",
                NameMatcher {
                    all_of: &["data-management"],
                    any_of: &["mongo", "mongodb"],
                },
                "Data Management with MongoDB & PyMongo",
                "Data management project using MongoDB and PyMongo to store, restructure and analyse GitHub OSS data. Focuses on querying commits, authors and activity patterns.",
                &["Python", "MongoDB", "PyMongo", "PySpark"],
                &["Data Analysis"],
                ImagePolicy::Fallback(
                    "https://raw.githubusercontent.com/georgekalf/data-management-mongodb/main/pymongo.jpg",
                ),
            ),
            rule(
                "covid-visualisation",
                NameMatcher::any(&["covid", "visual", "data-visual"]),
                "COVID-19 Impact on UK Businesses (Data Visualisation)",
                "Visual exploration of COVID-19 impact on UK businesses from 2019–2021 using Seaborn and Plotly, with interactive and animated charts across industries.",
                &["Python", "Seaborn", "Plotly", "Data Viz"],
                &["Data Analysis"],
                ImagePolicy::Fallback(VIZ),
            ),
            rule(
                "machine-learning-r",
                NameMatcher::all(&["machine", "learning", "r"]),
                "Machine Learning in R (Supervised & Unsupervised)",
                "ML exercises in R covering dimensionality reduction, clustering and classification. Includes decision trees, random forests, SVMs, kNN, LDA and cross-validation on datasets like German credit and medical data.",
                &["R", "ML", "Clustering", "Classification"],
                &["Machine Learning"],
                ImagePolicy::Fallback(MLR),
            ),
            rule(
                "network-analytics",
                NameMatcher::all(&["network", "analytic"]),
                "Network Analytics on Trading Floors & AI Adoption",
                "Network analysis of security traders’ knowledge-sharing relationships and attitudes toward AI on a trading floor, using graph metrics and positional data.",
                &["Python", "NetworkX", "Graph Analytics"],
                &["Data Analysis"],
                ImagePolicy::Fallback(NETWORK),
            ),
            rule(
                "credit-default",
                NameMatcher::any(&["loan", "credit", "default"]),
                "Credit Default Prediction & Drivers of Risk",
                "Credit risk modelling using bank client data with demographics, payment history and bill statements. Builds models to estimate default likelihood and identify key drivers for lending decisions.",
                &["Python", "ML", "Risk Modelling"],
                &["Machine Learning", "Finance"],
                ImagePolicy::Fallback(LOANS),
            ),
            rule(
                "shiny-drug-app",
                NameMatcher::any(&["shiny", "drug"]),
                "Drug Recommendation App (R Shiny)",
                "Interactive R Shiny app for drug recommendation and classification built as part of MSc work, predicting appropriate medications from patient characteristics.",
                &["R", "Shiny", "Classification"],
                &["Machine Learning", "Web Development"],
                ImagePolicy::Fallback(SHINY),
            ),
            rule(
                "time-series",
                NameMatcher::all(&["time", "series"]),
                "Time Series Forecasting with RNNs & CNNs",
                "Time series analysis framework using TensorFlow and Keras with LSTM and CNN architectures, plus preprocessing utilities and training/validation visualisations.",
                &["Python", "TensorFlow", "Keras", "Time Series"],
                &["Machine Learning", "Deep Learning"],
                ImagePolicy::Fallback(TIMESERIES),
            ),
        ])
    }
}
