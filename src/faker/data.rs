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

//! Word lists the generators draw from.

pub const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Adam", "Adrian", "Aisha", "Alba", "Alexander", "Alice", "Amelia", "Anders",
    "Andrea", "Anna", "Arne", "Astrid", "Benjamin", "Bjorn", "Camila", "Carlos", "Caroline",
    "Charlotte", "Chloe", "Daniel", "David", "Diego", "Elena", "Elias", "Ella", "Emil", "Emily",
    "Emma", "Erik", "Ethan", "Eva", "Felix", "Filip", "Freya", "Gabriel", "Grace", "Hannah",
    "Henrik", "Hugo", "Ida", "Ingrid", "Isaac", "Isabella", "Jakob", "James", "Janet", "Javier",
    "Jonas", "Julia", "Karin", "Kristian", "Laura", "Leo", "Liam", "Lina", "Lucas", "Lucia",
    "Magnus", "Maja", "Marcus", "Maria", "Martin", "Mateo", "Mia", "Nora", "Noah", "Olivia",
    "Oscar", "Pablo", "Paula", "Rafael", "Sara", "Sebastian", "Sigrid", "Sofia", "Sophie",
    "Thea", "Theo", "Thomas", "Tobias", "Victoria", "William", "Zoe",
];

pub const LAST_NAMES: &[&str] = &[
    "Abbott", "Andersen", "Bailey", "Berg", "Bennett", "Brooks", "Castillo", "Christensen",
    "Clarke", "Dahl", "Diaz", "Eriksen", "Evans", "Fernandez", "Fischer", "Foster", "Garcia",
    "Gomez", "Graham", "Hagen", "Hansen", "Harper", "Haugen", "Hayes", "Hernandez", "Holm",
    "Hughes", "Iversen", "Jensen", "Johansen", "Jordan", "Kelly", "Kristiansen", "Larsen",
    "Lopez", "Lund", "Martinez", "Meyer", "Moen", "Morales", "Murphy", "Nielsen", "Nilsen",
    "Olsen", "O'Connor", "O'Keefe", "Ortiz", "Pedersen", "Perez", "Price", "Ramirez",
    "Rasmussen", "Reyes", "Rivera", "Ruiz", "Sanchez", "Schmidt", "Solberg", "Strand",
    "Sullivan", "Torres", "Vargas", "Wagner", "Walsh", "Ward", "Weber", "Wood", "Young",
];

pub const PREFIXES: &[&str] = &["Mr.", "Mrs.", "Ms.", "Miss", "Dr."];

pub const SUFFIXES: &[&str] = &["Jr.", "Sr.", "I", "II", "III", "IV", "V", "MD", "DDS", "PhD"];

pub const TITLE_DESCRIPTORS: &[&str] = &[
    "Lead", "Senior", "Direct", "Corporate", "Dynamic", "Future", "Product", "National",
    "Regional", "District", "Central", "Global", "Customer", "Investor", "International",
    "Legacy", "Forward", "Internal", "Human", "Chief", "Principal",
];

pub const TITLE_LEVELS: &[&str] = &[
    "Solutions", "Program", "Brand", "Security", "Research", "Marketing", "Directives",
    "Implementation", "Integration", "Functionality", "Response", "Paradigm", "Tactics",
    "Identity", "Markets", "Group", "Division", "Applications", "Optimization", "Operations",
    "Infrastructure", "Intranet", "Communications", "Web", "Quality", "Assurance", "Mobility",
    "Accounts", "Data", "Creative", "Configuration", "Accountability", "Interactions",
    "Factors", "Usability", "Metrics",
];

pub const TITLE_JOBS: &[&str] = &[
    "Supervisor", "Associate", "Executive", "Liaison", "Officer", "Manager", "Engineer",
    "Specialist", "Director", "Coordinator", "Administrator", "Architect", "Analyst",
    "Designer", "Planner", "Orchestrator", "Technician", "Developer", "Producer", "Consultant",
    "Assistant", "Facilitator", "Agent", "Representative", "Strategist",
];

pub const SAFE_EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

pub const FREE_EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com"];

pub const DOMAIN_WORDS: &[&str] = &[
    "acme", "bluebird", "brightside", "cloudbay", "corner", "crestline", "eastwood", "fjord",
    "greenleaf", "harbor", "hilltop", "ironworks", "lakeside", "maplewood", "meadow", "northstar",
    "oakridge", "pinecrest", "quarry", "redrock", "riverside", "silverline", "stonegate",
    "summit", "sunset", "westfield", "willow",
];

pub const DOMAIN_SUFFIXES: &[&str] = &["com", "net", "org", "info", "biz", "name", "io", "no", "es"];

pub const STREET_NAMES: &[&str] = &[
    "Oak", "Maple", "Cedar", "Pine", "Elm", "Willow", "Birch", "Chestnut", "Spruce", "Lake",
    "Hill", "River", "Park", "Meadow", "Forest", "Sunset", "Highland", "Church", "Mill",
    "Market", "Bridge", "Harbor", "Station", "Garden", "Valley", "Orchard", "Spring", "Ridge",
];

pub const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Place", "Boulevard", "Way",
    "Terrace", "Square", "Parkway", "Crossing", "Trail",
];

pub const SECONDARY_ADDRESS_FORMATS: &[&str] = &["Apt. ###", "Suite ###"];

pub const CITY_PREFIXES: &[&str] = &["North", "East", "West", "South", "New", "Lake", "Port", "Fort"];

pub const CITY_SUFFIXES: &[&str] = &[
    "town", "ton", "land", "ville", "berg", "burgh", "borough", "bury", "view", "port", "mouth",
    "stad", "furt", "chester", "fort", "haven", "side", "shire",
];

pub const STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
    "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
    "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio",
    "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota",
    "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington", "West Virginia",
    "Wisconsin", "Wyoming",
];

/// (country, ISO 3166-1 alpha-2 code)
pub const COUNTRIES: &[(&str, &str)] = &[
    ("Argentina", "AR"),
    ("Australia", "AU"),
    ("Austria", "AT"),
    ("Belgium", "BE"),
    ("Brazil", "BR"),
    ("Canada", "CA"),
    ("Chile", "CL"),
    ("Denmark", "DK"),
    ("Estonia", "EE"),
    ("Finland", "FI"),
    ("France", "FR"),
    ("Germany", "DE"),
    ("Greece", "GR"),
    ("Iceland", "IS"),
    ("Ireland", "IE"),
    ("Italy", "IT"),
    ("Japan", "JP"),
    ("Mexico", "MX"),
    ("Netherlands", "NL"),
    ("New Zealand", "NZ"),
    ("Norway", "NO"),
    ("Poland", "PL"),
    ("Portugal", "PT"),
    ("Spain", "ES"),
    ("Sweden", "SE"),
    ("Switzerland", "CH"),
    ("United Kingdom", "GB"),
    ("United States of America", "US"),
];

pub const COMPANY_SUFFIXES: &[&str] = &["Inc", "and Sons", "LLC", "Group", "AS", "SL", "Ltd"];

pub const CREDIT_CARD_TYPES: &[&str] = &[
    "visa",
    "mastercard",
    "american_express",
    "discover",
    "diners_club",
    "jcb",
    "switch",
    "solo",
    "dankort",
    "maestro",
    "forbrugsforeningen",
    "laser",
];

pub const PHONE_FORMATS: &[&str] = &[
    "###-###-####",
    "(###) ###-####",
    "1-###-###-####",
    "###.###.####",
    "+47 ### ## ###",
    "+34 ### ### ###",
];

pub const LOREM_WORDS: &[&str] = &[
    "alias", "consequatur", "aut", "perferendis", "sit", "voluptatem", "accusantium",
    "doloremque", "aperiam", "eaque", "ipsa", "quae", "ab", "illo", "inventore", "veritatis",
    "et", "quasi", "architecto", "beatae", "vitae", "dicta", "sunt", "explicabo", "aspernatur",
    "odit", "fugit", "sed", "quia", "consequuntur", "magni", "dolores", "eos", "qui",
    "ratione", "sequi", "nesciunt", "neque", "dolorem", "ipsum", "dolor", "amet",
    "consectetur", "adipisci", "velit", "numquam", "eius", "modi", "tempora", "incidunt", "ut",
    "labore", "dolore", "magnam", "aliquam", "quaerat", "enim", "ad", "minima", "veniam",
    "quis", "nostrum", "exercitationem", "ullam", "corporis", "nemo", "ipsam", "voluptas",
];
