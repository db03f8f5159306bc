use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorlink_shared::{MatchRequest, RequestAction};

use crate::auth::{BrowserApi, use_auth};
use crate::components::common::{AccessDenied, ErrorAlert, NoticeToast, Spinner, StatusBadge};
use crate::screens::requests::{Direction, RequestBoard, load, perform};
use crate::web::timer::auto_dismiss;

#[component]
pub fn RequestsPage() -> impl IntoView {
    let auth = use_auth();
    let role = auth.session().user().map(|u| u.role).unwrap_or_default();
    let Some(board) = RequestBoard::new(role) else {
        return view! { <AccessDenied message="Your role has no request list." /> }.into_any();
    };

    let title = board.direction.title();
    let board = RwSignal::new(board);
    auto_dismiss(board);
    let api = StoredValue::new(auth.api().clone());

    let reload = move || {
        let api = api.get_value();
        spawn_local(async move {
            load(&board, &api).await;
        });
    };
    reload();

    let loading = move || board.with(|b| b.loading);

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-6">
            <NoticeToast notice=Signal::derive(move || board.with(|b| b.notice.clone())) />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-6 pb-2">
                        <div>
                            <h3 class="card-title">{title}</h3>
                            <Show when=move || board.with(|b| b.stale)>
                                <span class="badge badge-warning">"May be out of date"</span>
                            </Show>
                        </div>
                        <button
                            class="btn btn-ghost btn-sm"
                            on:click=move |_| reload()
                            disabled=loading
                        >
                            "Refresh"
                        </button>
                    </div>

                    <div class="px-6">
                        <ErrorAlert message=Signal::derive(move || board.with(|b| b.error.clone())) />
                    </div>

                    <Show
                        when=move || !board.with(|b| b.loading && b.requests.is_empty())
                        fallback=|| view! { <Spinner /> }
                    >
                        <ul class="divide-y divide-base-200">
                            <Show when=move || board.with(|b| b.requests.is_empty())>
                                <li class="text-center py-8 text-base-content/50">"No requests yet."</li>
                            </Show>
                            <For
                                each=move || board.with(|b| b.requests.clone())
                                key=|r| (r.id, r.status)
                                children=move |request| view! {
                                    <RequestRow request=request board=board api=api.get_value() />
                                }
                            />
                        </ul>
                    </Show>
                </div>
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn RequestRow(request: MatchRequest, board: RwSignal<RequestBoard>, api: BrowserApi) -> impl IntoView {
    let id = request.id;
    let actions = board.with_untracked(|b| b.actions_for(&request));
    let busy = move || board.with(|b| b.is_busy(id));
    let api = StoredValue::new(api);

    let buttons = actions
        .into_iter()
        .map(|action| {
            let class = match action {
                RequestAction::Accept => "btn btn-success btn-sm",
                RequestAction::Reject | RequestAction::Cancel => "btn btn-error btn-outline btn-sm",
            };
            let on_click = move |_: leptos::ev::MouseEvent| {
                let api = api.get_value();
                spawn_local(async move {
                    perform(&board, &api, id, action).await;
                });
            };
            view! {
                <button class=class disabled=busy on:click=on_click>
                    {action.label()}
                </button>
            }
        })
        .collect_view();

    let counterpart = match board.with_untracked(|b| b.direction) {
        Direction::Incoming => format!("From mentee #{}", request.mentee_id),
        Direction::Outgoing => format!("To mentor #{}", request.mentor_id),
    };

    view! {
        <li class="p-6 flex flex-col md:flex-row md:items-center gap-4">
            <div class="flex-1 space-y-1">
                <div class="flex items-center gap-2">
                    <span class="font-semibold">{counterpart}</span>
                    <StatusBadge status=request.status />
                </div>
                <p class="text-base-content/80 whitespace-pre-line">{request.message.clone()}</p>
            </div>
            <div class="flex gap-2">{buttons}</div>
        </li>
    }
}
