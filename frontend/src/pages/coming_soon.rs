use chrono::{DateTime, Utc};
use yew::prelude::*;

use crate::components::animated_background::AnimatedBackground;
use crate::components::countdown::Countdown;
use crate::components::waitlist_form::WaitlistForm;
use crate::config;

#[derive(Clone, PartialEq, Debug)]
pub struct Feature {
    /// Font Awesome solid icon name, e.g. `fa-globe`.
    pub icon: AttrValue,
    pub title: AttrValue,
    pub description: AttrValue,
}

pub fn default_features() -> Vec<Feature> {
    vec![
        Feature {
            icon: "fa-comment".into(),
            title: "24/7 AI Assistant".into(),
            description: "Get instant answers to all your study abroad questions anytime, anywhere".into(),
        },
        Feature {
            icon: "fa-globe".into(),
            title: "Global Program Database".into(),
            description: "Access comprehensive information about universities and courses worldwide".into(),
        },
        Feature {
            icon: "fa-rocket".into(),
            title: "Smart Recommendations".into(),
            description: "Receive personalized program suggestions based on your preferences".into(),
        },
    ]
}

#[derive(Properties, PartialEq, Clone, Default)]
pub struct ComingSoonProps {
    #[prop_or_default]
    pub launch_date: Option<DateTime<Utc>>,
    /// Replaces the default features in the lower feature grid.
    #[prop_or_default]
    pub custom_features: Option<Vec<Feature>>,
}

fn feature_grid(features: &[Feature]) -> Html {
    html! {
        <div class="feature-grid">
            { for features.iter().enumerate().map(|(index, feature)| html! {
                <div key={index} class="feature-card">
                    <div class="feature-icon"><i class={classes!("fas", feature.icon.to_string())}></i></div>
                    <h3>{feature.title.clone()}</h3>
                    <p>{feature.description.clone()}</p>
                </div>
            }) }
        </div>
    }
}

#[function_component]
pub fn ComingSoon(props: &ComingSoonProps) -> Html {
    let launch_date = props.launch_date.unwrap_or_else(config::default_launch_date);
    let defaults = default_features();
    let features = props.custom_features.clone().unwrap_or_else(|| defaults.clone());

    let page_css = r#"
        .coming-soon {
            min-height: 100vh;
            position: relative;
            overflow: hidden;
            background: #f9fafb;
        }
        .coming-soon-veil {
            position: absolute;
            inset: 0;
            background: linear-gradient(to bottom, rgba(255,255,255,0.5), rgba(255,255,255,0.3), rgba(255,255,255,0.5));
            pointer-events: none;
        }
        .coming-soon main {
            position: relative;
            z-index: 10;
        }
        .top-nav {
            position: sticky;
            top: 0;
            backdrop-filter: blur(12px);
            background: rgba(255, 255, 255, 0.7);
        }
        .top-nav-inner, .page-body {
            max-width: 80rem;
            margin: 0 auto;
            padding: 1rem 2rem;
            display: flex;
            align-items: center;
            justify-content: space-between;
        }
        .page-body {
            display: block;
            padding: 4rem 2rem;
        }
        .brand {
            display: flex;
            align-items: center;
            gap: 1rem;
            font-size: 1.5rem;
            font-weight: 700;
        }
        .brand i, .nav-badge {
            color: #2563eb;
        }
        .gradient-text {
            background: linear-gradient(to right, #2563eb, #9333ea, #db2777);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
        }
        .hero {
            text-align: center;
            margin-bottom: 4rem;
        }
        .hero-badge {
            display: inline-flex;
            align-items: center;
            gap: 1rem;
            background: #eff6ff;
            color: #2563eb;
            border-radius: 9999px;
            padding: 0.5rem 1.5rem;
            margin-bottom: 2rem;
            font-weight: 500;
        }
        .hero h1 {
            font-size: 3.75rem;
            font-weight: 700;
            margin-bottom: 1.5rem;
        }
        .hero p {
            font-size: 1.25rem;
            color: #4b5563;
            max-width: 42rem;
            margin: 0 auto 3rem;
        }
        .feature-grid {
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 2rem;
            margin-bottom: 4rem;
        }
        .feature-card {
            background: rgba(255, 255, 255, 0.8);
            backdrop-filter: blur(12px);
            border-radius: 0.5rem;
            padding: 1.5rem;
            box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1);
            transition: transform 0.3s;
        }
        .feature-card:hover {
            transform: translateY(-0.5rem);
        }
        .feature-icon i {
            font-size: 2rem;
            color: #3b82f6;
            margin-bottom: 1rem;
        }
        .feature-card h3 {
            font-size: 1.25rem;
            font-weight: 600;
            margin-bottom: 0.5rem;
        }
        .feature-card p {
            color: #4b5563;
        }
        .chat-preview {
            max-width: 28rem;
            margin: 0 auto 4rem;
            background: rgba(255, 255, 255, 0.9);
            border-radius: 0.5rem;
            box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1);
            overflow: hidden;
        }
        .chat-header {
            padding: 1rem;
            background: linear-gradient(to right, #2563eb, #9333ea);
            color: white;
            font-weight: 500;
            display: flex;
            gap: 0.5rem;
            align-items: center;
        }
        .chat-body {
            padding: 1.5rem;
        }
        .chat-bubble {
            background: #dbeafe;
            border-radius: 0.5rem;
            padding: 0.75rem;
            margin-bottom: 1rem;
            color: #1f2937;
        }
        .chat-input {
            display: flex;
            align-items: center;
            gap: 0.5rem;
            background: #f9fafb;
            border-radius: 0.5rem;
            padding: 0.5rem;
        }
        .chat-input input {
            flex: 1;
            background: transparent;
            border: none;
            color: #4b5563;
        }
        .chat-input i {
            color: #9ca3af;
        }
        @media (max-width: 768px) {
            .hero h1 {
                font-size: 3rem;
            }
            .feature-grid {
                grid-template-columns: 1fr;
            }
        }
    "#;

    html! {
        <div class="coming-soon">
            <style>{page_css}</style>
            <AnimatedBackground />
            <div class="coming-soon-veil"></div>

            <main>
                <nav class="top-nav">
                    <div class="top-nav-inner">
                        <div class="brand">
                            <i class="fas fa-graduation-cap"></i>
                            <span class="gradient-text">{"StudiVerse"}</span>
                        </div>
                        <div class="nav-badge">
                            <i class="fas fa-robot"></i>{" AI Chatbot"}
                        </div>
                    </div>
                </nav>

                <div class="page-body">
                    <div class="hero">
                        <div class="hero-badge">
                            <i class="fas fa-robot"></i>
                            <span>{"AI-Powered Study Abroad Assistant"}</span>
                        </div>
                        <h1 class="gradient-text">
                            {"StudiVerse Chatbot"}<br/>{"Coming Soon"}
                        </h1>
                        <p>
                            {"Your intelligent companion for navigating the world of international education. Get ready for personalized study abroad guidance powered by advanced AI."}
                        </p>
                        <Countdown {launch_date} />
                    </div>

                    { feature_grid(&defaults) }

                    <div class="chat-preview">
                        <div class="chat-header">
                            <i class="fas fa-robot"></i>
                            <span>{"StudiVerse Assistant"}</span>
                        </div>
                        <div class="chat-body">
                            <div class="chat-bubble">
                                {"👋 Hi! I'm the StudiVerse AI assistant. I'll be here soon to help you with all your study abroad questions!"}
                            </div>
                            <div class="chat-input">
                                <input type="text" placeholder="Get notified when chat launches..." disabled=true />
                                <i class="fas fa-paper-plane"></i>
                            </div>
                        </div>
                    </div>

                    { feature_grid(&features) }

                    <WaitlistForm />
                </div>
            </main>
        </div>
    }
}
