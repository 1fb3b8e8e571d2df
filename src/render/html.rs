use crate::tree::{VersionTree, Walk};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
	<head>
		<meta charset="utf-8">
		<link rel="stylesheet" href="https://stackpath.bootstrapcdn.com/bootstrap/4.4.1/css/bootstrap.min.css" integrity="sha384-Vkoo8x4CGsO3+Hhxv8T/Q5PaXtkKtu6ug5TOeNV6gBiFeWPGFN9MuhOf23Q9Ifjh" crossorigin="anonymous">
		<script src="https://code.jquery.com/jquery-3.4.1.slim.min.js" integrity="sha384-J6qa4849blE2+poT4WnyKhv5vZF5SrPo0iEjwBvKU7imGFAV0wwj1yYfoRSJoZ+n" crossorigin="anonymous"></script>
		<script src="https://cdn.jsdelivr.net/npm/popper.js@1.16.0/dist/umd/popper.min.js" integrity="sha384-Q6E9RHvbIyZFJoft+2mJbHaEWldlvI9IOYy5n3zV9zzTtmI3UksdQRVvoxMfooAo" crossorigin="anonymous"></script>
		<script src="https://stackpath.bootstrapcdn.com/bootstrap/4.4.1/js/bootstrap.min.js" integrity="sha384-wfSDF2E50Y2D1uUdj0O3uMBJnjuUD4Ih7YwaYd1iqfktj0Uod8GCExl3Og8ifwB6" crossorigin="anonymous"></script>
		<meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
		<title>Exchange versions</title>
	</head>
	<body><div class="container-fluid">
		<h1>Exchange versions</h1>
		<button class="btn btn-primary mb-2" type="button" data-toggle="collapse" data-target=".vt-collapse-dead" aria-expanded="true">Toggle old versions</button>
		Also see <a href="https://github.com/stbuehler/exchange-version-check">project on github</a>.
		<table class="table table-striped table-responsive" id="vt">
			<thead class="thead-dark"><tr><th scope="col">Name</th><th scope="col">Version</th><th scope="col">Latest Release</th></tr></thead>
"#;

const PAGE_TAIL: &str = "\t\t</table>\n\t</div></body>\n</html>\n";

/// Full standalone report page
pub fn html_page(forest: &[VersionTree]) -> String {
    let mut page = String::from(PAGE_HEAD);
    page.push_str(&html_rows(forest));
    page.push_str(PAGE_TAIL);
    page
}

/// One `<tr>` per node that has a name or a record, in walk order.
///
/// Dead nodes get `text-danger` cells; anything that is not an alive
/// build can be hidden with the "Toggle old versions" button.
pub fn html_rows(forest: &[VersionTree]) -> String {
    let mut rows = String::new();
    for (depth, node) in Walk::new(forest) {
        let Some(row) = Row::for_node(node) else {
            continue;
        };

        let alive = node.is_alive();
        let danger = if alive { "" } else { r#" class="text-danger""# };
        let collapse = if alive && node.record().is_some() {
            ""
        } else {
            r#" class="collapse show vt-collapse-dead""#
        };

        rows.push_str(&format!(
            "<tr{collapse}><td style=\"padding-left: {indent}em;\">{name}</td><td{danger}>{code}</td><td{danger}>{date}</td></tr>\n",
            indent = 2 * depth,
            name = row.name,
            code = row.code,
            date = row.date,
        ));
    }
    rows
}

struct Row<'a> {
    name: &'a str,
    code: String,
    date: String,
}

impl<'a> Row<'a> {
    fn for_node(node: &'a VersionTree) -> Option<Self> {
        if let Some(record) = node.record() {
            return Some(Row {
                name: record.html_name().unwrap_or(record.name()),
                code: record.code().to_string(),
                date: record.date_string(),
            });
        }
        if node.name().is_empty() {
            return None;
        }
        Some(Row {
            name: node.html_name().unwrap_or(node.name()),
            code: node.wildcard_code(),
            date: node.latest_release_string().unwrap_or_default(),
        })
    }
}
