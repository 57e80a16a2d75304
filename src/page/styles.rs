//! Class names for each page
//!
//! Every renderer takes its style object as an argument; nothing here is global.

use serde::{Deserialize, Serialize};

/// Classes used by the blog post page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostStyles {
    pub container: String,
    pub cover: String,
    pub heading: String,
    pub meta_strip: String,
    pub timestamp: String,
    pub badge_list: String,
    pub badge: String,
    pub article: String,
}

impl Default for PostStyles {
    fn default() -> Self {
        Self {
            container: "post".to_string(),
            cover: "post-cover".to_string(),
            heading: "post-title".to_string(),
            meta_strip: "post-meta".to_string(),
            timestamp: "post-date".to_string(),
            badge_list: "post-tags".to_string(),
            badge: "badge".to_string(),
            article: "prose".to_string(),
        }
    }
}

/// Classes used by the about page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutStyles {
    pub container: String,
    pub heading: String,
    pub portrait: String,
    pub greeting: String,
    pub section: String,
    pub card: String,
    pub card_title: String,
    pub details: String,
    pub cv_list: String,
    pub cv_item: String,
    pub cv_logo: String,
    pub cv_company: String,
    pub cv_role: String,
    pub cv_dates: String,
    pub button: String,
}

impl Default for AboutStyles {
    fn default() -> Self {
        Self {
            container: "about".to_string(),
            heading: "about-title".to_string(),
            portrait: "portrait".to_string(),
            greeting: "greeting".to_string(),
            section: "about-section".to_string(),
            card: "card".to_string(),
            card_title: "card-title".to_string(),
            details: "accordion".to_string(),
            cv_list: "cv".to_string(),
            cv_item: "cv-item".to_string(),
            cv_logo: "cv-logo".to_string(),
            cv_company: "cv-company".to_string(),
            cv_role: "cv-role".to_string(),
            cv_dates: "cv-dates".to_string(),
            button: "button".to_string(),
        }
    }
}

/// Classes used by the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeStyles {
    pub container: String,
    pub notice: String,
}

impl Default for HomeStyles {
    fn default() -> Self {
        Self {
            container: "home".to_string(),
            notice: "notice".to_string(),
        }
    }
}
