/*!

# Quick start

The roster is the spreadsheet behind the clerkship sign-up form (one row
per student). Each row carries the student's name, an optional phone
number, an email address, and a specialty/location pair per round plus
the selective:

| Name | (optional) Phone Number | Email Address | Round 1 Specialty | Round 1 Location | ... | Selective Specialty | Selective Location |
|------|-------------------------|---------------|-------------------|------------------|-----|---------------------|--------------------|
| Alice Lee | | alice@example.edu | Surgery | City Hospital | ... | Radiology | Imaging Center |
| Bob Tan | 555-0199 | bob@example.edu | Surgery | County Hospital | ... | | |

A round with an empty specialty or location is simply skipped for that
student; a half-filled row never fails the load.

## From a local export

Download the sheet in Excel or CSV format and point `rotamatch` at it:

```bash
rotamatch --input roster.xlsx --name 'Alice Lee' --block 'Round 1'
```

This prints the peers sharing Alice's Round 1 specialty as JSON. Without
`--name`/`--block`, `rotamatch` starts the web service instead and
serves lookups at `/find_matches`.

## From the online sheet

Create a config file naming the sheet and range, and supply a read
credential (a bearer token, either as a file or through the
`SHEETS_API_TOKEN` environment variable):

```json
{
    "rosterSources": [
        {
            "provider": "google_sheets",
            "sheetId": "1VwjJy0_9NdFHPIPLd9GA6mr0OUiMq_IxaRFyEQD7C1Q",
            "rangeName": "Unformatted"
        }
    ]
}
```

```bash
SHEETS_API_TOKEN=... rotamatch --config roster.json
```

The roster is fetched once at startup and again whenever `/` is hit;
each reload replaces the in-memory record list wholesale.

## As a library

Use the [builder](crate::builder::Builder) to assemble records by hand,
or [`normalize_table`](crate::normalize_table) on any headered table,
then query with [`find_matches`](crate::find_matches).

*/
