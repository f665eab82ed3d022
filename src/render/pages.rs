//! Page templates. Styling lives in the shared `styles` partial.

pub const STYLES: &str = r"<style>
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        max-width: 1200px;
        margin: 0 auto;
        padding: 20px;
        background-color: #f5f5f5;
        color: #1a1a1a;
        line-height: 1.5;
    }
    a { color: #667eea; }
    .container, .card {
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        margin-bottom: 20px;
    }
    .header { text-align: center; margin-bottom: 30px; }
    .back-link { margin-bottom: 20px; }
    .event-title { margin: 0 0 15px 0; font-size: 2.2em; font-weight: 600; }
    .meta, .stats {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
        gap: 15px;
        margin-bottom: 20px;
    }
    .meta-label, .stat-label { display: block; color: #666; font-size: 0.85em; text-transform: uppercase; }
    .stat { text-align: center; background: #f8f9fa; border-radius: 6px; padding: 15px; }
    .stat-number { font-size: 1.8em; font-weight: 700; color: #667eea; }
    .section-title { border-bottom: 2px solid #e0e0e0; padding-bottom: 8px; }
    .photo-gallery { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 10px; }
    .photo-item img { width: 100%; height: 200px; object-fit: cover; border-radius: 6px; }
    .rsvp, .comment, .row { padding: 10px 0; border-bottom: 1px solid #eee; }
    .rsvp-response, .rsvp-status { padding: 2px 8px; border-radius: 12px; font-size: 0.8em; margin: 0 8px; }
    .yes, .attended { background: #d4edda; color: #155724; }
    .no, .no-show { background: #f8d7da; color: #721c24; }
    .waitlist { background: #fff3cd; color: #856404; }
    .rsvp-date, .comment-date, .muted { color: #888; font-size: 0.85em; }
    .nav-links a { margin-right: 10px; }
    .year-header { font-size: 1.4em; font-weight: 600; margin: 30px 0 10px 0; }
    .row { display: grid; grid-template-columns: 180px 1fr 80px 80px; gap: 10px; align-items: center; }
    .attendees-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 10px; }
    @media (max-width: 700px) { .row { grid-template-columns: 1fr; } }
</style>";

pub const EVENT_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    {{> styles}}
</head>
<body>
    <div class="container">
        <header>
            <h1 class="event-title">{{title}}</h1>
            <div class="meta">
                <div><span class="meta-label">Date &amp; Time</span>{{date_time}}</div>
                {{#if duration}}
                <div><span class="meta-label">Duration</span>{{duration}}</div>
                {{/if}}
                {{#if venue}}
                <div><span class="meta-label">Venue</span>{{venue.name}}<br>{{venue.address}}</div>
                {{/if}}
                {{#if group_name}}
                <div><span class="meta-label">Group</span>{{group_name}}</div>
                {{/if}}
                {{#if event_url}}
                <div><span class="meta-label">Event URL</span><a href="{{event_url}}" target="_blank">View on Meetup</a></div>
                {{/if}}
            </div>
            <div class="stats">
                <div class="stat"><div class="stat-number">{{photos_len}}</div><div class="stat-label">Photos</div></div>
                <div class="stat"><div class="stat-number">{{comments_len}}</div><div class="stat-label">Comments</div></div>
                <div class="stat"><div class="stat-number">{{rsvps_len}}</div><div class="stat-label">RSVPs</div></div>
                {{#if photo_total}}
                <div class="stat"><div class="stat-number">{{photo_total}}</div><div class="stat-label">Total Photos</div></div>
                {{/if}}
            </div>
        </header>

        {{#if description}}
        <section>
            <h2 class="section-title">Description</h2>
            <div class="description">{{{multiline description}}}</div>
        </section>
        {{/if}}

        {{#if photos}}
        <section>
            <h2 class="section-title">Photos ({{photos_len}})</h2>
            <div class="photo-gallery">
                {{#each photos}}
                <div class="photo-item">
                    <a href="photos/{{file_name}}" target="_blank"><img src="photos/{{file_name}}" alt="Event photo {{id}}" loading="lazy"></a>
                </div>
                {{/each}}
            </div>
        </section>
        {{/if}}

        {{#if rsvps}}
        <section>
            <h2 class="section-title">RSVPs ({{rsvps_len}})</h2>
            {{#each rsvps}}
            <div class="rsvp {{status_class}}">
                <strong>{{member_name}}</strong>
                <span class="rsvp-response {{status_class}}">{{status}}</span>
                <span class="rsvp-date">{{date}}</span>
                {{#if guests}}<div class="rsvp-guests">{{guests}}</div>{{/if}}
            </div>
            {{/each}}
        </section>
        {{/if}}

        {{#if comments}}
        <section>
            <h2 class="section-title">Comments ({{comments_len}})</h2>
            {{#each comments}}
            <div class="comment">
                <strong>{{member_name}}</strong>
                <span class="comment-date">{{date}}</span>
                <div class="comment-text">{{{multiline text}}}</div>
            </div>
            {{/each}}
        </section>
        {{/if}}
    </div>
</body>
</html>
"##;

pub const ARCHIVE_INDEX_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{archive_title}}</title>
    {{> styles}}
</head>
<body>
    <div class="header">
        <h1>{{archive_title}}</h1>
    </div>

    <div class="stats">
        <div class="stat"><div class="stat-number">{{total_events}}</div><div class="stat-label">Total Events</div></div>
        <div class="stat"><div class="stat-number">{{total_rsvps}}</div><div class="stat-label">Total RSVPs</div></div>
        <div class="stat"><div class="stat-number">{{total_photos}}</div><div class="stat-label">Total Photos</div></div>
        <div class="stat"><div class="stat-number">{{years_active}}</div><div class="stat-label">Years Active</div></div>
    </div>

    <div class="card nav-links">
        <strong>Jump to year:</strong>
        {{#each years}}<a href="#year-{{year}}">{{year}}</a>{{/each}}
        <a href="attendees/">View Attendees</a>
    </div>

    {{#each years}}
    <div class="card" id="year-{{year}}">
        <div class="year-header">{{year}} ({{plural count "event"}})</div>
        {{#each events}}
        <div class="row">
            <div class="muted">{{date}}</div>
            <div>
                <a href="downloads/{{directory}}/">{{title}}</a>
                {{#if venue_name}}<div class="muted">{{venue_name}}</div>{{/if}}
            </div>
            <div>{{rsvp_count}} RSVPs</div>
            <div>{{photo_count}} photos</div>
        </div>
        {{/each}}
    </div>
    {{/each}}
</body>
</html>
"##;

pub const ATTENDEE_INDEX_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{archive_title}} - Attendees</title>
    {{> styles}}
</head>
<body>
    <div class="back-link"><a href="../">&larr; Back to Events</a></div>

    <div class="header">
        <h1>{{archive_title}} Attendees</h1>
        <p>{{count}} members who have RSVP'd to events</p>
    </div>

    <div class="attendees-grid">
        {{#each attendees}}
        <div class="card">
            <a href="{{file_name}}">{{name}}</a>
            <div class="muted">{{plural event_count "event"}}</div>
        </div>
        {{/each}}
    </div>
</body>
</html>
"##;

pub const ATTENDEE_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{name}} - {{archive_title}}</title>
    {{> styles}}
</head>
<body>
    <div class="back-link"><a href="index.html">&larr; Back to Attendees</a></div>

    <div class="header">
        <h1>{{name}}</h1>
        <p>Participated in {{plural event_count "event"}}</p>
    </div>

    {{#each events}}
    <div class="card">
        <div class="muted">{{event.date}}</div>
        <div class="event-name"><a href="../downloads/{{event.directory}}/">{{event.title}}</a></div>
        <div>
            <span class="rsvp-status {{status_class}}">{{status}}</span>
            <span class="muted">RSVP'd {{rsvp_date}}</span>
            <span>{{event.photo_count}} photos</span>
            {{#if event.venue_name}}<span class="muted">{{event.venue_name}}</span>{{/if}}
        </div>
    </div>
    {{/each}}
</body>
</html>
"##;
