use std::{cell::RefCell, rc::Rc, time::Duration};

use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions};
use yew::platform::time::sleep;
use yew::prelude::*;

use super::use_prefs;
use crate::chat::{ChatError, ChatScript, Fired, Scheduled, Sender};

fn open_mail(href: &str) {
    let Some(win) = window() else {
        return;
    };
    if let Err(err) = win.location().set_href(href) {
        log::warn!("could not open mail draft: {err:?}");
    }
}

/// Plays out a reply and anything it chains, one delay at a time.
fn play_out(script: Rc<RefCell<ChatScript>>, redraw: UseForceUpdateHandle, first: Scheduled) {
    spawn_local(async move {
        let mut pending = Some(first);
        while let Some(Scheduled { delay_ms, event }) = pending.take() {
            sleep(Duration::from_millis(u64::from(delay_ms))).await;
            let fired = script.borrow_mut().fire(event);
            redraw.force_update();
            match fired {
                Fired::Shown => {}
                Fired::Then(next) => pending = Some(next),
                Fired::Draft(draft) => open_mail(&draft.href()),
            }
        }
    });
}

#[function_component(ChatWidget)]
pub fn chat_widget() -> Html {
    let prefs = use_prefs();
    let open = use_state_eq(|| false);
    let script = use_mut_ref(ChatScript::new);
    let input = use_state(String::new);
    let redraw = use_force_update();
    let end_ref = use_node_ref();

    let message_count = script.borrow().messages().len();
    {
        let end_ref = end_ref.clone();
        use_effect_with((message_count, *open), move |_| {
            if let Some(end) = end_ref.cast::<web_sys::Element>() {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                end.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });
    }

    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| {
            prefs.click();
            open.set(!*open);
        })
    };

    let send = {
        let script = script.clone();
        let input = input.clone();
        Callback::from(move |_: ()| {
            let submitted = script.borrow_mut().submit(&input);
            match submitted {
                Ok(reply) => {
                    input.set(String::new());
                    redraw.force_update();
                    play_out(script.clone(), redraw.clone(), reply);
                }
                Err(ChatError::Blank) => {}
                Err(err) => log::debug!("chat input ignored: {err}"),
            }
        })
    };

    let oninput = {
        let input = input.clone();
        Callback::from(move |event: InputEvent| {
            input.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let onkeydown = {
        let send = send.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                send.emit(());
            }
        })
    };

    let step = script.borrow().step();
    let blank = input.trim().is_empty();

    html! {
        <>
            <button
                class={classes!("chat-toggle", (*open).then_some("open"))}
                aria-label={if *open { "Close chat" } else { "Open chat" }}
                onclick={toggle}
            >
                { if *open { "✕" } else { "💬" } }
            </button>
            if *open {
                <div class="chat-window">
                    <div class="chat-header">
                        <div class="chat-avatar">{ "🤖" }</div>
                        <div>
                            <h3>{ "Saran's Assistant" }</h3>
                            <p class="chat-online"><span class="pulse-dot" />{ "Online" }</p>
                        </div>
                    </div>
                    <div class="chat-messages">
                        { for script.borrow().messages().iter().map(|message| html! {
                            <div
                                key={message.id}
                                class={classes!(
                                    "chat-row",
                                    (message.sender == Sender::User).then_some("from-user"),
                                )}
                            >
                                <div class="chat-bubble">{ message.text.clone() }</div>
                            </div>
                        }) }
                        <div ref={end_ref} />
                    </div>
                    if let Some(placeholder) = step.placeholder() {
                        <div class="chat-input">
                            <input
                                type="text"
                                value={(*input).clone()}
                                {placeholder}
                                autofocus=true
                                {oninput}
                                {onkeydown}
                            />
                            <button
                                class="chat-send"
                                aria-label="Send"
                                disabled={blank}
                                onclick={send.reform(|_: MouseEvent| ())}
                            >
                                { "➤" }
                            </button>
                        </div>
                    }
                </div>
            }
        </>
    }
}
