/*
 * Responsibility
 * - view handler が返す最小限の HTML を組み立てる
 * - ページが3枚しかないのでテンプレートエンジンは使わない
 */
use axum::response::Html;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n"
    ))
}

fn error_line(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!("<p class=\"error\">{msg}</p>\n"),
        None => String::new(),
    }
}

// user 由来の値を埋め込むのはここだけ
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn login(error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Log in</h1>\n\
         {}\
         <form method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p><a href=\"/register\">Register</a></p>",
        error_line(error)
    );

    layout("Log in", &body)
}

pub fn register(error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Register</h1>\n\
         {}\
         <form method=\"post\" action=\"/register\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p><a href=\"/login\">Log in</a></p>",
        error_line(error)
    );

    layout("Register", &body)
}

pub fn home(email: &str) -> Html<String> {
    let body = format!(
        "<h1>Todo List</h1>\n\
         <p>Logged in as {}</p>\n\
         <p><a href=\"/logout\">Log out</a></p>",
        escape(email)
    );

    layout("Todo List", &body)
}
