// Marketing pages: home, about, services, contact
// Decision: Content lives in code as static data; there is no CMS

use axum::{extract::State, response::Html};
use meridian_gate::CurrentSession;
use serde::Serialize;

use super::{render_page, PageError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Service {
    pub slug: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub deliverables: &'static [&'static str],
}

pub const SERVICES: &[Service] = &[
    Service {
        slug: "strategy",
        name: "Strategy",
        summary: "Turn a fuzzy ambition into a plan with owners, milestones and a budget.",
        deliverables: &[
            "Market and competitor review",
            "Twelve-month roadmap",
            "Board-ready investment case",
        ],
    },
    Service {
        slug: "operations",
        name: "Operations",
        summary: "Find where time and money leak out of your processes and fix it.",
        deliverables: &[
            "Process mapping workshops",
            "Cost and cycle-time baseline",
            "Improvement backlog with quick wins",
        ],
    },
    Service {
        slug: "technology",
        name: "Technology",
        summary: "Choose, buy and roll out the systems your teams actually need.",
        deliverables: &[
            "Vendor shortlist and scoring",
            "Integration architecture",
            "Rollout and training plan",
        ],
    },
];

#[derive(Debug, Serialize)]
struct CompanyValue {
    name: &'static str,
    summary: &'static str,
}

const VALUES: &[CompanyValue] = &[
    CompanyValue {
        name: "Plain answers",
        summary: "We say what we think, in writing, with the numbers behind it.",
    },
    CompanyValue {
        name: "Small teams",
        summary: "Two or three senior people on every engagement, start to finish.",
    },
    CompanyValue {
        name: "Leave it running",
        summary: "Work is done when your team can carry it without us.",
    },
];

const STORY: &[&str] = &[
    "We started as three operators who had spent a decade on the client side of consulting projects.",
    "Today we help mid-sized companies plan, fix and modernise how they work.",
];

const HERO_IMAGE: &str = "https://images.unsplash.com/photo-1552664730-d307ca884978?w=1200&q=80";

#[derive(Debug, Serialize)]
struct Contact {
    email: &'static str,
    phone: &'static str,
    address: &'static [&'static str],
}

const CONTACT: Contact = Contact {
    email: "hello@meridian.example",
    phone: "+1 (555) 010-2040",
    address: &["400 Harbor Street, Suite 12", "Portland, OR 97204"],
};

/// Route a remote image through the allow-listed proxy.
pub fn proxied_image_url(remote: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(remote.as_bytes()).collect();
    format!("/_assets/image?url={}", encoded)
}

pub async fn home(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, PageError> {
    #[derive(Serialize)]
    struct Home<'a> {
        headline: &'a str,
        tagline: &'a str,
        hero_image: String,
        services: &'a [Service],
    }

    render_page(
        &state,
        session.as_ref(),
        "home.html",
        "Home",
        "home",
        Home {
            headline: "Consulting that ships",
            tagline: "Strategy, operations and technology advice for companies that need results this year.",
            hero_image: proxied_image_url(HERO_IMAGE),
            services: SERVICES,
        },
    )
}

pub async fn about(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, PageError> {
    #[derive(Serialize)]
    struct About<'a> {
        story: &'a [&'a str],
        values: &'a [CompanyValue],
    }

    render_page(
        &state,
        session.as_ref(),
        "about.html",
        "About",
        "about",
        About {
            story: STORY,
            values: VALUES,
        },
    )
}

pub async fn services(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, PageError> {
    #[derive(Serialize)]
    struct Services<'a> {
        services: &'a [Service],
    }

    render_page(
        &state,
        session.as_ref(),
        "services.html",
        "Services",
        "services",
        Services { services: SERVICES },
    )
}

pub async fn contact(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, PageError> {
    render_page(
        &state,
        session.as_ref(),
        "contact.html",
        "Contact",
        "contact",
        CONTACT,
    )
}
