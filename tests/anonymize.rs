// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anonymize_mysqldump::{
    AnonymizeError, ConfigError, DumpLine, LineRewriter, Pipeline, Policy, RunSummary,
};
use matches::assert_matches;
use rand::Rng;
use regex::Regex;
use std::collections::HashSet;
use std::io::Cursor;
use std::time::Duration;

/// A MySQL string literal, escapes included.
const LIT: &str = r"'(?:[^'\\]|\\.)*'";

const USERS: &str = "INSERT INTO `wp_users` VALUES (1,'username','user_pass','username','hosting@humanmade.com','','2019-06-12 00:59:19','',0,'username'),(2,'username','user_pass','username','hosting@humanmade.com','http://notreal.com/username','2019-06-12 00:59:19','',0,'username');";

const USER_META: &str = "INSERT INTO `wp_usermeta` VALUES (1,1,'first_name','John'),(2,1,'last_name','Doe'),(3,1,'foobar','bazquz'),(4,1,'nickname','Jim'),(5,1,'description','Lorum ipsum.'),(6,2,'first_name','Janet'),(7,2,'last_name','Doe'),(8,2,'foobar','bazquz'),(9,2,'nickname','Jane'),(10,2,'description','Lorum ipsum.');";

const MULTILINE: &str = "INSERT INTO wp_usermeta VALUES\n\t(1,1,'first_name','John'),(2,1,'last_name','Doe'),\n\t(3,1,'foobar','bazquz'),\n\t(4,1,'nickname','Jim'),\n\t(5,1,'description','Lorum ipsum.');";

const COMMENTS: &str = "INSERT INTO `wp_comments` VALUES (1,1,'A WordPress Commenter','wapuu@wordpress.example','https://wordpress.org/','','2019-06-12 00:59:19','2019-06-12 00:59:19','Hi, this is a comment.',0,'1','','',0,0);";

const DROP_AND_CREATE: &str = "DROP TABLE IF EXISTS `wp_options`;
/*!40101 SET @saved_cs_client     = @@character_set_client */;
/*!40101 SET character_set_client = utf8 */;
CREATE TABLE `wp_options` (
`option_id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,
`option_name` varchar(191) NOT NULL DEFAULT '',
`option_value` longtext NOT NULL,
`autoload` varchar(20) NOT NULL DEFAULT 'yes',
PRIMARY KEY (`option_id`),
UNIQUE KEY `option_name` (`option_name`)
) ENGINE=InnoDB AUTO_INCREMENT=123 DEFAULT CHARSET=utf8mb4;
/*!40101 SET character_set_client = @saved_cs_client */;";

fn init_logging() {
    let _ = simple_logger::init_with_level(log::Level::Warn);
}

async fn anonymize_with(pipeline: Pipeline, input: &str) -> (String, RunSummary) {
    init_logging();
    let mut out = Vec::new();
    let summary = pipeline
        .run(Cursor::new(input.to_string()), &mut out)
        .await
        .unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

async fn anonymize(input: &str) -> String {
    anonymize_with(Pipeline::new(Policy::wordpress().unwrap()), input)
        .await
        .0
}

fn pattern(template: &str) -> Regex {
    Regex::new(&format!("^{}$", template.replace("LIT", LIT))).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn users_are_anonymized() {
    let out = anonymize(USERS).await;
    let expected = pattern(
        r"insert into wp_users values \(1, LIT, '[0-9a-f]{32}', LIT, '[^'@]+@[^'@]+', '', '2019-06-12 00:59:19', '', 0, LIT\), \(2, LIT, '[0-9a-f]{32}', LIT, '[^'@]+@[^'@]+', 'http://notreal.com/username', '2019-06-12 00:59:19', '', 0, LIT\);\n",
    );
    assert!(expected.is_match(&out), "{}", out);
    assert!(!out.contains("hosting@humanmade.com"));
    assert!(!out.contains("user_pass"));
}

#[tokio::test(flavor = "multi_thread")]
async fn usermeta_follows_meta_keys() {
    let out = anonymize(USER_META).await;
    let expected = pattern(
        r"insert into wp_usermeta values \(1, 1, 'first_name', LIT\), \(2, 1, 'last_name', LIT\), \(3, 1, 'foobar', 'bazquz'\), \(4, 1, 'nickname', LIT\), \(5, 1, 'description', LIT\), \(6, 2, 'first_name', LIT\), \(7, 2, 'last_name', LIT\), \(8, 2, 'foobar', 'bazquz'\), \(9, 2, 'nickname', LIT\), \(10, 2, 'description', LIT\);\n",
    );
    assert!(expected.is_match(&out), "{}", out);
    assert!(!out.contains("'Lorum ipsum.'"));
    assert!(!out.contains("'Janet'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn multiline_insert_is_reassembled() {
    let out = anonymize(MULTILINE).await;
    let expected = pattern(
        r"insert into wp_usermeta values \(1, 1, 'first_name', LIT\), \(2, 1, 'last_name', LIT\), \(3, 1, 'foobar', 'bazquz'\), \(4, 1, 'nickname', LIT\), \(5, 1, 'description', LIT\);\n",
    );
    assert!(expected.is_match(&out), "{}", out);
}

#[tokio::test(flavor = "multi_thread")]
async fn comments_are_anonymized() {
    let out = anonymize(COMMENTS).await;
    let expected = pattern(
        r"insert into wp_comments values \(1, 1, LIT, '[^'@]+@[^'@]+', 'http://[^']+', '', '2019-06-12 00:59:19', '2019-06-12 00:59:19', 'Hi, this is a comment.', 0, '1', '', '', 0, 0\);\n",
    );
    assert!(expected.is_match(&out), "{}", out);
    assert!(!out.contains("wapuu"));
}

#[tokio::test(flavor = "multi_thread")]
async fn schema_statements_pass_through() {
    let (out, summary) =
        anonymize_with(Pipeline::new(Policy::wordpress().unwrap()), DROP_AND_CREATE).await;
    assert_eq!(out, format!("{}\n", DROP_AND_CREATE));
    assert_eq!(summary.statements, 5);
}

#[tokio::test(flavor = "multi_thread")]
async fn unconfigured_tables_are_untouched() {
    let dump = "INSERT INTO `wp_posts` VALUES (1,1,'2019-06-12 00:59:19','Welcome to WordPress.','Hello world!');\n";
    assert_eq!(anonymize(dump).await, dump);
}

#[tokio::test(flavor = "multi_thread")]
async fn whole_dump_keeps_its_shape() {
    let dump = format!(
        "-- MySQL dump 10.13\n--\n\n{}\n\nLOCK TABLES `wp_users` WRITE;\n{}\nUNLOCK TABLES;\n{}\n{}\n",
        DROP_AND_CREATE, USERS, USER_META, COMMENTS
    );
    let out = anonymize(&dump).await;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), dump.lines().count());
    assert_eq!(lines[0], "-- MySQL dump 10.13");
    assert_eq!(lines[2], "");
    assert_eq!(lines[16], "LOCK TABLES `wp_users` WRITE;");
    assert!(lines[17].starts_with("insert into wp_users values (1, "));
    assert_eq!(lines[18], "UNLOCK TABLES;");
    assert!(lines[19].starts_with("insert into wp_usermeta values (1, 1, 'first_name', "));
    assert!(lines[20].starts_with("insert into wp_comments values (1, 1, "));
}

#[tokio::test(flavor = "multi_thread")]
async fn multi_row_inserts_keep_their_rows() {
    let rows: Vec<String> = (1..=50)
        .map(|i| format!("({},'user{}','secret','nice','user{}@example.org','','2019-06-12 00:59:19','',0,'User {}')", i, i, i, i))
        .collect();
    let dump = format!("INSERT INTO wp_users VALUES {};", rows.join(","));
    let out = anonymize(&dump).await;

    let row = Regex::new(r"\((\d+), ").unwrap();
    let ids: Vec<u32> = row
        .captures_iter(&out)
        .map(|c| c[1].parse().unwrap())
        .collect();
    assert_eq!(ids, (1..=50).collect::<Vec<_>>());
    for i in 1..=50 {
        assert!(!out.contains(&format!("user{}@example.org", i)));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn emails_are_unique_across_statements() {
    let statements: String = (0..200)
        .map(|i| format!("INSERT INTO wp_users (ID, user_email) VALUES ({}, 'same@example.com');\n", i))
        .collect();
    let out = anonymize(&statements).await;

    let email = Regex::new(r"values \(\d+, '([^']+)'\);").unwrap();
    let emails: Vec<String> = email
        .captures_iter(&out)
        .map(|c| c[1].to_string())
        .collect();
    assert_eq!(emails.len(), 200);
    let distinct: HashSet<&String> = emails.iter().collect();
    assert_eq!(distinct.len(), 200);
}

#[tokio::test(flavor = "multi_thread")]
async fn learned_schema_maps_columns() {
    let policy = Policy::from_json_str(
        r#"{"tables": {"customers": {"fields": {"email": "email", "notes": "purge"}}}}"#,
    )
    .unwrap();
    let dump = "INSERT INTO customers VALUES (0,'early@example.com','kept');
CREATE TABLE `customers` (
  `id` int NOT NULL,
  `email` varchar(255) NOT NULL,
  `notes` text,
  PRIMARY KEY (`id`)
);
INSERT INTO `customers` VALUES (1,'late@example.com','private');
";
    let (out, _) = anonymize_with(Pipeline::new(policy), dump).await;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "INSERT INTO customers VALUES (0,'early@example.com','kept');");
    let late = pattern(r"insert into customers values \(1, '[^'@]+@[^'@]+', ''\);");
    assert!(late.is_match(lines.last().unwrap()), "{}", out);
}

/// Sleeps a random while before echoing, so rewrites finish out of order.
struct Jittery;

impl LineRewriter for Jittery {
    fn rewrite(&self, line: &DumpLine) -> Vec<u8> {
        let delay = rand::thread_rng().gen_range(0..20);
        std::thread::sleep(Duration::from_millis(delay));
        line.pass_through()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn order_survives_random_delays() {
    let input: String = (0..300).map(|i| format!("SELECT {};\n", i)).collect();
    let (out, summary) = anonymize_with(Pipeline::with_rewriter(Jittery), &input).await;
    assert_eq!(out, input);
    assert_eq!(summary.statements, 300);
}

#[tokio::test(flavor = "multi_thread")]
async fn ordered_output_can_be_pulled() {
    let pipeline = Pipeline::with_rewriter(Jittery);
    let mut output = pipeline.dispatch(Cursor::new("a;\nb;\nc;\n"));
    let mut seen = Vec::new();
    while let Some(statement) = output.next().await {
        seen.push(statement.unwrap());
    }
    assert_eq!(seen, vec![b"a;\n".to_vec(), b"b;\n".to_vec(), b"c;\n".to_vec()]);
}

#[test]
fn unknown_transformer_fails_before_running() {
    let err = Policy::from_json_str(
        r#"{"tables": {"wp_users": {"fields": {"user_email": "emailAddress"}}}}"#,
    )
    .unwrap_err();
    assert_matches!(err, ConfigError::UnknownTransformer { ref name, .. } if name == "emailAddress");

    let err: AnonymizeError = err.into();
    assert!(err.to_string().contains("emailAddress"));
}
