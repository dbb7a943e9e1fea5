//! Canned listing and abstract pages shaped like the live sites' markup

/// One `<dt>`/`<dd>` pair on the preprint listing
pub struct ListingEntry {
    pub meta: String,
    pub title: String,
    pub authors: Vec<String>,
}

/// One day header and the entries under it
pub struct ListingDay {
    pub date: &'static str,
    pub entries: Vec<ListingEntry>,
}

/// `meta` starts with the paper id, optionally followed by a marker such as
/// `(replaced)`
pub fn entry(meta: &str, title: &str, authors: &[&str]) -> ListingEntry {
    ListingEntry {
        meta: meta.to_string(),
        title: title.to_string(),
        authors: authors.iter().map(|a| a.to_string()).collect(),
    }
}

/// Builds a catch-up listing page; `next` becomes the last `<li>` link
pub fn arxiv_listing(days: &[ListingDay], next: Option<&str>) -> String {
    let mut html = String::from("<html><body>\n<div id=\"dlpage\">\n");

    for day in days {
        html.push_str(&format!(
            "<h2><a name=\"{}\">Listing for {}</a></h2>\n<dl>\n",
            day.date, day.date
        ));

        for entry in &day.entries {
            let id = entry.meta.split_whitespace().next().unwrap_or_default();
            let marker = entry.meta[id.len()..].trim();
            let authors: Vec<String> = entry
                .authors
                .iter()
                .map(|author| format!("<a href=\"/a/{}\">{}</a>", author.replace(' ', "_"), author))
                .collect();

            html.push_str(&format!(
                "<dt><a name=\"item\"></a><span class=\"list-identifier\">\
<a href=\"/abs/{id}\" title=\"Abstract\">arXiv:{id}</a> {marker} \
[<a href=\"/pdf/{id}\" title=\"Download PDF\">pdf</a>]</span></dt>\n\
<dd>\n<div class=\"meta\">\n<div class=\"list-title mathjax\">\n\
<span class=\"descriptor\">Title:</span> {title}\n</div>\n\
<div class=\"list-authors\">\n<span class=\"descriptor\">Authors:</span>\n{authors}\n</div>\n\
</div>\n</dd>\n",
                id = id,
                marker = marker,
                title = entry.title,
                authors = authors.join(", \n"),
            ));
        }

        html.push_str("</dl>\n");
    }

    html.push_str("</div>\n");
    if let Some(next) = next {
        html.push_str(&format!(
            "<ul>\n<li><a href=\"/list\">all</a></li>\n<li><a href=\"{}\">next</a></li>\n</ul>\n",
            next.replace('&', "&amp;")
        ));
    }
    html.push_str("</body></html>\n");
    html
}

/// One paper on the ranking listing
pub struct RankedPaper {
    pub title: &'static str,
    pub authors: &'static [&'static str],
    pub scites: u32,
}

/// Builds a ranking page; `next_date` (`YYYY-MM-DD`) sets the next-day button
pub fn scirate_listing(papers: &[RankedPaper], next_date: Option<&str>) -> String {
    let mut html = String::from("<html><body>\n<table><tr>\n");
    html.push_str("<td class=\"btn-default half top left\"><a href=\"?date=2000-01-01&amp;range=1\">prev</a></td>\n");
    if let Some(date) = next_date {
        html.push_str(&format!(
            "<td class=\"btn-default half top right\"><a href=\"?date={}&amp;range=1\">next</a></td>\n",
            date
        ));
    }
    html.push_str("</tr></table>\n<ul class=\"papers\">\n");

    for paper in papers {
        html.push_str(&format!(
            "<li class=\"paper tex2jax\">\n\
<div class=\"scites\"><button class=\"btn btn-default count\">{}</button></div>\n\
<div class=\"title\"><a href=\"/arxiv/x\">{}</a></div>\n\
<div class=\"authors\">{}</div>\n</li>\n",
            paper.scites,
            paper.title,
            paper.authors.join(", ")
        ));
    }

    html.push_str("</ul>\n</body></html>\n");
    html
}

/// Builds an abstract page with one `[vN]` history line per version
pub fn abstract_page(abstract_text: &str, versions: &[&str]) -> String {
    let mut history = String::from("<div class=\"submission-history\">\nFrom: Someone [<a href=\"/mail\">view email</a>]\n");
    for (index, version) in versions.iter().enumerate() {
        history.push_str(&format!("<b>[v{}]</b> {}<br/>\n", index + 1, version));
    }
    history.push_str("</div>");

    format!(
        "<html><body>\n<h1 class=\"title mathjax\">A paper</h1>\n\
<blockquote class=\"abstract mathjax\">{}</blockquote>\n{}\n</body></html>\n",
        abstract_text, history
    )
}
