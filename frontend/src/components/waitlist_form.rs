use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::utils::waitlist::{begin_submit, finish_submit, join_waitlist, SubmitStatus};

#[function_component]
pub fn WaitlistForm() -> Html {
    let email = use_state(String::new);
    let status = use_state(SubmitStatus::default);

    let oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onsubmit = {
        let email = email.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(pending) = begin_submit(&status, &email) else {
                return;
            };
            let address = (*email).clone();
            let email = email.clone();
            let status = status.clone();
            status.set(pending);
            wasm_bindgen_futures::spawn_local(async move {
                let result = join_waitlist(&address).await;
                let (next_status, next_email) = finish_submit(result, &address);
                email.set(next_email);
                status.set(next_status);
            });
        })
    };

    let form_css = r#"
        .waitlist {
            max-width: 28rem;
            margin: 0 auto;
            text-align: center;
        }
        .waitlist h2 {
            font-size: 1.5rem;
            font-weight: 600;
            margin-bottom: 1rem;
        }
        .waitlist p {
            color: #4b5563;
            margin-bottom: 1.5rem;
        }
        .waitlist-row {
            display: flex;
            gap: 0.5rem;
        }
        .waitlist-row input {
            flex: 1;
            padding: 0.5rem 1rem;
            border-radius: 0.5rem;
            border: 1px solid #d1d5db;
        }
        .waitlist-row input:focus {
            outline: none;
            box-shadow: 0 0 0 2px #3b82f6;
        }
        .waitlist-row button {
            padding: 0.5rem 1.5rem;
            background: linear-gradient(to right, #2563eb, #9333ea);
            color: white;
            border: none;
            border-radius: 0.5rem;
            cursor: pointer;
            transition: opacity 0.2s;
        }
        .waitlist-row button:hover {
            opacity: 0.9;
        }
        .waitlist-row button.busy {
            opacity: 0.7;
            cursor: not-allowed;
        }
        .alert {
            margin-top: 1rem;
            padding: 1rem;
            border-radius: 0.5rem;
            text-align: left;
        }
        .alert-success {
            background: #f0fdf4;
            border: 1px solid #bbf7d0;
            color: #166534;
        }
        .alert-error {
            background: #fef2f2;
            border: 1px solid #fecaca;
            color: #991b1b;
        }
    "#;

    let disabled = status.inputs_disabled();
    html! {
        <div class="waitlist">
            <style>{form_css}</style>
            <h2>{"Be the First to Know"}</h2>
            <p>{"Get early access to our AI study abroad assistant!"}</p>
            <form {onsubmit}>
                <div class="waitlist-row">
                    <input
                        type="email"
                        placeholder="Enter your email"
                        value={(*email).clone()}
                        {oninput}
                        {disabled}
                    />
                    <button
                        type="submit"
                        class={classes!(status.is_submitting.then_some("busy"))}
                        {disabled}
                    >
                        {status.button_label()}
                    </button>
                </div>
                if status.is_submitted {
                    <div class="alert alert-success">
                        {"Thanks for joining! We'll notify you when we launch."}
                    </div>
                }
                if let Some(error) = &status.error {
                    <div class="alert alert-error">{error.clone()}</div>
                }
            </form>
        </div>
    }
}
