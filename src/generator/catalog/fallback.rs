use crate::generator::enrich::overrides::{HOTEL_IMAGE, TIMESERIES_IMAGE};
use crate::types::EnrichedRecord;

/// 仓库列表拉取失败时展示的静态项目
pub fn fallback_projects(profile_url: &str) -> Vec<EnrichedRecord> {
    vec![
        EnrichedRecord {
            name: "Hotel Reservations Analysis".to_string(),
            display_title: "Hotel Reservation Cancellation & Guest Segmentation (ML)".to_string(),
            description: "Explores hotel reservation data with EDA and KMeans clustering to segment guests and understand booking behaviour. Trains multiple ML models to predict cancellations and compare performance.".to_string(),
            tags: vec!["Python".to_string(), "ML".to_string(), "Clustering".to_string()],
            image_url: Some(HOTEL_IMAGE.to_string()),
            source_url: profile_url.to_string(),
            categories: vec!["Machine Learning".to_string(), "Data Analysis".to_string()],
        },
        EnrichedRecord {
            name: "Time Series RNN CNN".to_string(),
            display_title: "Time Series Forecasting with RNNs & CNNs".to_string(),
            description: "Time series modelling framework using TensorFlow and Keras with LSTM and CNN architectures, including preprocessing utilities and training visualisations.".to_string(),
            tags: vec!["Python".to_string(), "TensorFlow".to_string(), "Keras".to_string()],
            image_url: Some(TIMESERIES_IMAGE.to_string()),
            source_url: profile_url.to_string(),
            categories: vec!["Machine Learning".to_string(), "Deep Learning".to_string()],
        },
    ]
}
