use chrono::{DateTime, Utc};
use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::utils::countdown::{now_millis, TimeLeft};

#[derive(Properties, PartialEq, Clone)]
pub struct CountdownProps {
    pub launch_date: DateTime<Utc>,
}

#[function_component]
pub fn Countdown(props: &CountdownProps) -> Html {
    let target = props.launch_date.timestamp_millis();
    let time_left = use_state(|| TimeLeft::until(target, now_millis()));

    {
        let time_left = time_left.clone();
        use_effect_with_deps(
            move |target| {
                let target = *target;
                time_left.set(TimeLeft::until(target, now_millis()));
                let interval = Interval::new(1000, move || {
                    time_left.set(TimeLeft::until(target, now_millis()));
                });
                move || drop(interval)
            },
            target,
        );
    }

    let countdown_css = r#"
        .countdown-grid {
            display: grid;
            grid-template-columns: repeat(4, 1fr);
            gap: 1rem;
            max-width: 42rem;
            margin: 0 auto;
        }
        .countdown-card {
            background: rgba(255, 255, 255, 0.8);
            backdrop-filter: blur(12px);
            border-radius: 0.5rem;
            padding: 1.5rem;
            box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1);
        }
        .countdown-value {
            font-size: 2.25rem;
            font-weight: 700;
            color: #2563eb;
        }
        .countdown-unit {
            color: #4b5563;
            text-transform: capitalize;
        }
        @media (max-width: 768px) {
            .countdown-grid {
                grid-template-columns: repeat(2, 1fr);
            }
        }
    "#;

    html! {
        <div class="countdown-grid">
            <style>{countdown_css}</style>
            { for time_left.units().into_iter().map(|(unit, value)| html! {
                <div key={unit} class="countdown-card">
                    <div class="countdown-value">{ value.to_string() }</div>
                    <div class="countdown-unit">{ unit }</div>
                </div>
            }) }
        </div>
    }
}
